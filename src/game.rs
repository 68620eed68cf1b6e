use std::{io, thread::sleep, time::Instant};

use crate::Coords;
use crate::config::{CELL_WIDTH, GRID_HEIGHT, GRID_WIDTH, INITIAL_SNAKE_LENGTH};
use crate::input::GameEvent;
use crate::snake::{Direction, Grid};
use crate::state::{GameState, Snapshot, Status};
use crate::term::TermManager;

use crossterm::style::Color;
use log::{info, trace};
use rand::Rng;

const SNAKE_BODY_CHAR: char = '█';
const APPLE_CHAR: char = '●';
const DEAD_SNAKE_CHAR: char = 'X';

const HEAD_COLOR: Color = Color::DarkGreen;
const BODY_COLOR: Color = Color::Green;
const APPLE_COLOR: Color = Color::Red;
const DEAD_COLOR: Color = Color::DarkGrey;

pub struct SnakeGame {
    term: TermManager,
    layout: Layout,
    state: GameState,
}

impl SnakeGame {
    pub fn new() -> io::Result<Self> {
        let grid = Grid::new(GRID_WIDTH, GRID_HEIGHT, INITIAL_SNAKE_LENGTH)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let term = TermManager::new()?;
        let layout = Layout::new(term.get_terminal_size(), &grid)?;

        info!("{}x{} grid, terminal {:?}", grid.width(), grid.height(), term.get_terminal_size());

        Ok(SnakeGame { term, layout, state: GameState::new(grid) })
    }

    /// Takes over the terminal and plays until the player quits.
    pub fn run(&mut self) -> io::Result<()> {
        self.term.setup()?;
        let res = self.play();
        let restored = self.term.restore();
        first_error(res, restored)
    }

    fn play(&mut self) -> io::Result<()> {
        self.term.clear()?;
        self.term.draw_borders(self.layout.border, self.layout.border_size)?;

        loop {
            let tick_start = Instant::now();

            for key_ev in self.term.read_key_events_queue()? {
                if let Some(ev) = GameEvent::from_key(&key_ev) {
                    if !handle_event(&mut self.state, ev) {
                        info!("quit with score {}", self.state.score());
                        return Ok(());
                    }
                }
            }

            if !self.state.is_game_over() {
                let step = self.state.advance();
                trace!("{:?} -> {:?}", step, self.state.snake().head());
            }

            draw_frame(&mut self.term, &self.layout, &self.state.snapshot())?;

            // Recomputed every tick so the speed follows the score.
            let interval = self.state.tick_interval();
            if let Some(rest) = interval.checked_sub(tick_start.elapsed()) {
                sleep(rest);
            }
        }
    }
}

/// Applies one input event to the game. Returns false when the player quits.
fn handle_event<R: Rng>(state: &mut GameState<R>, ev: GameEvent) -> bool {
    match ev {
        GameEvent::Quit => return false,
        GameEvent::Restart if state.is_game_over() => state.restart(),
        GameEvent::Restart => trace!("ignoring restart, game is still running"),
        GameEvent::Direction(dir) => {
            state.set_intent(dir);
        }
    }
    true
}

/// Keeps the error from playing over one from restoring the terminal.
fn first_error(play: io::Result<()>, restore: io::Result<()>) -> io::Result<()> {
    play.and(restore)
}

/// Where the board sits on the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layout {
    border: Coords,
    border_size: Coords,
    /// Terminal position of grid cell (0, 0).
    origin: Coords,
    score_line: Coords,
}

impl Layout {
    fn new(term_size: Coords, grid: &Grid) -> io::Result<Self> {
        let row_width = grid.width() * CELL_WIDTH;
        let border_size = (row_width + 2, grid.height() + 2);
        // One extra line on top for the score.
        let needed = (border_size.0, border_size.1 + 1);

        if term_size.0 < needed.0 || term_size.1 < needed.1 {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "terminal is {}x{}, the board needs at least {}x{}",
                    term_size.0, term_size.1, needed.0, needed.1
                ),
            ));
        }

        let score_line = ((term_size.0 - needed.0) / 2, (term_size.1 - needed.1) / 2);
        let border = (score_line.0, score_line.1 + 1);

        Ok(Layout {
            border,
            border_size,
            origin: (border.0 + 1, border.1 + 1),
            score_line,
        })
    }

    fn cell_pos(&self, pos: Coords) -> Coords {
        (self.origin.0 + pos.0 * CELL_WIDTH, self.origin.1 + pos.1)
    }
}

fn cell(ch: char) -> String {
    ch.to_string().repeat(CELL_WIDTH as usize)
}

fn head_char(dir: Direction) -> char {
    match dir {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

fn draw_frame(term: &mut TermManager, layout: &Layout, snap: &Snapshot<'_>) -> io::Result<()> {
    let blank = " ".repeat((snap.grid.width() * CELL_WIDTH) as usize);
    for y in 0..snap.grid.height() {
        term.print_at((layout.origin.0, layout.origin.1 + y), &blank, None)?;
    }

    term.print_at(layout.score_line, &format!("Score: {:<8}", snap.score), None)?;

    if let Some(apple) = snap.food {
        term.print_at(layout.cell_pos(apple), &cell(APPLE_CHAR), Some(APPLE_COLOR))?;
    }

    let crashed = snap.status == Status::Crashed;
    for (i, pos) in snap.snake.body().enumerate() {
        let (ch, color) = match (crashed, i) {
            (true, _) => (DEAD_SNAKE_CHAR, DEAD_COLOR),
            (false, 0) => (head_char(snap.direction), HEAD_COLOR),
            (false, _) => (SNAKE_BODY_CHAR, BODY_COLOR),
        };
        term.print_at(layout.cell_pos(pos), &cell(ch), Some(color))?;
    }

    if snap.game_over() {
        let title = if snap.status == Status::Won {"You won!"} else {"Game Over"};
        term.show_message(&[
            title,
            &format!("Score: {}", snap.score),
            "",
            "Press R to restart or ESC to quit",
        ])?;
    }

    term.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid() -> Grid {
        Grid::new(GRID_WIDTH, GRID_HEIGHT, INITIAL_SNAKE_LENGTH).unwrap()
    }

    #[test]
    fn layout_centers_the_board() {
        let layout = Layout::new((80, 24), &grid()).unwrap();

        assert_eq!(layout.border_size, (62, 22));
        assert_eq!(layout.score_line, (9, 0));
        assert_eq!(layout.border, (9, 1));
        assert_eq!(layout.origin, (10, 2));
        assert_eq!(layout.cell_pos((0, 0)), (10, 2));
        assert_eq!(layout.cell_pos((29, 19)), (68, 21));
    }

    #[test]
    fn layout_fits_exactly() {
        let layout = Layout::new((62, 23), &grid()).unwrap();
        assert_eq!(layout.score_line, (0, 0));
        assert_eq!(layout.origin, (1, 2));
    }

    #[test]
    fn small_terminal_is_an_error() {
        assert!(Layout::new((61, 40), &grid()).is_err());
        assert!(Layout::new((100, 22), &grid()).is_err());
    }

    fn state() -> GameState<ChaCha8Rng> {
        GameState::with_rng(grid(), ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn restart_is_ignored_while_running() {
        let mut state = state();
        state.advance();
        state.advance();
        let head = state.snake().head();

        assert!(handle_event(&mut state, GameEvent::Restart));
        assert!(!state.is_game_over());
        assert_eq!(state.snake().head(), head);
        assert_eq!(head, (17, 10));
    }

    #[test]
    fn restart_after_crash_starts_over() {
        let mut state = state();
        state.set_board(&[(0, 10), (29, 10)], Direction::Left, Some((5, 5)));
        state.advance();
        assert!(state.is_game_over());

        assert!(handle_event(&mut state, GameEvent::Restart));
        assert!(!state.is_game_over());
        assert_eq!(state.snake().head(), (15, 10));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn directions_go_to_the_state_and_quit_stops() {
        let mut state = state();

        assert!(handle_event(&mut state, GameEvent::Direction(Direction::Up)));
        assert_eq!(state.pending(), Direction::Up);

        assert!(handle_event(&mut state, GameEvent::Direction(Direction::Left)));
        assert_eq!(state.pending(), Direction::Up);

        assert!(!handle_event(&mut state, GameEvent::Quit));
    }

    #[test]
    fn play_error_wins_over_restore_error() {
        let play = Err(io::Error::new(io::ErrorKind::Other, "draw failed"));
        let restore = Err(io::Error::new(io::ErrorKind::Other, "restore failed"));
        assert_eq!(first_error(play, restore).unwrap_err().to_string(), "draw failed");

        let restore = Err(io::Error::new(io::ErrorKind::Other, "restore failed"));
        assert_eq!(first_error(Ok(()), restore).unwrap_err().to_string(), "restore failed");

        assert!(first_error(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn cells_are_cell_width_wide() {
        assert_eq!(cell('X').chars().count(), CELL_WIDTH as usize);
    }
}
