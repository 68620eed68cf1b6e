use std::time::Duration;

use log::{debug, info, trace};
use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};

use crate::config::{self, INITIAL_SNAKE_LENGTH};
use crate::snake::{Direction::{self, *}, Grid, Snake};
use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// The head ran into the body.
    Crashed,
    /// The snake fills the whole grid, there is nowhere left to put food.
    Won,
}

impl Status {
    pub fn is_game_over(self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// What a single call to [`GameState::advance`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The game is over, nothing moved.
    Idle,
    Moved,
    Ate,
    Crashed,
    Won,
}

/// Read-only view of the state handed to the renderer.
#[derive(Copy, Clone, Debug)]
pub struct Snapshot<'a> {
    pub grid: Grid,
    pub snake: &'a Snake,
    pub food: Option<Coords>,
    pub score: u32,
    pub direction: Direction,
    pub status: Status,
}

impl Snapshot<'_> {
    pub fn game_over(&self) -> bool {
        self.status.is_game_over()
    }
}

pub struct GameState<R = ThreadRng> {
    grid: Grid,
    snake: Snake,
    direction: Direction,
    pending: Direction,
    food: Option<Coords>,
    score: u32,
    status: Status,
    rng: R,
}

impl GameState<ThreadRng> {
    pub fn new(grid: Grid) -> Self {
        GameState::with_rng(grid, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(grid: Grid, rng: R) -> Self {
        let mut state = GameState {
            grid,
            snake: initial_snake(&grid),
            direction: Right,
            pending: Right,
            food: None,
            score: 0,
            status: Status::Running,
            rng,
        };
        state.reset();
        state
    }

    /// Buffers a direction change for the next tick.
    ///
    /// The request is checked against the direction the snake is currently
    /// moving in, not against an earlier buffered request, so two quick key
    /// presses can't turn the snake back onto itself within one tick.
    /// Returns whether the request was accepted.
    pub fn set_intent(&mut self, dir: Direction) -> bool {
        if self.status.is_game_over() {
            trace!("ignoring {:?}, game is over", dir);
            return false;
        }

        if dir == self.direction.opposite() {
            trace!("ignoring {:?}, snake is heading {:?}", dir, self.direction);
            return false;
        }

        self.pending = dir;
        true
    }

    /// Moves the game forward by one tick. Does nothing once the game is over.
    pub fn advance(&mut self) -> Step {
        if self.status.is_game_over() {
            return Step::Idle;
        }

        self.direction = self.pending;
        let new_head = self.grid.step(self.snake.head(), self.direction);

        // The tail hasn't moved out of the way yet, so running into it counts.
        if self.snake.contains(new_head) {
            self.status = Status::Crashed;
            info!("crashed into {:?} with score {}", new_head, self.score);
            return Step::Crashed;
        }

        let ate = self.food == Some(new_head);
        self.snake.push_head(new_head, ate);

        if !ate {
            return Step::Moved;
        }

        self.score += 1;
        self.food = self.place_food();

        match self.food {
            Some(food) => {
                debug!("score {}, new food at {:?}", self.score, food);
                Step::Ate
            }
            None => {
                self.status = Status::Won;
                info!("board filled with score {}", self.score);
                Step::Won
            }
        }
    }

    /// Puts the game back to its starting configuration, whatever state it is in.
    pub fn restart(&mut self) {
        info!("restarting, previous score {}", self.score);
        self.reset();
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
            score: self.score,
            direction: self.direction,
            status: self.status,
        }
    }

    /// Time until the next tick, based on the current score.
    pub fn tick_interval(&self) -> Duration {
        config::tick_interval(self.score)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn reset(&mut self) {
        self.snake = initial_snake(&self.grid);
        self.direction = Right;
        self.pending = Right;
        self.score = 0;
        self.status = Status::Running;
        self.food = self.place_food();

        if self.food.is_none() {
            // Grid::new refuses sizes where this can happen.
            self.status = Status::Won;
        }
    }

    /// Picks a random free cell, or `None` if the snake covers the grid.
    fn place_food(&mut self) -> Option<Coords> {
        let snake = &self.snake;
        let free: Vec<Coords> = self.grid.cells().filter(|pos| !snake.contains(*pos)).collect();
        free.choose(&mut self.rng).copied()
    }
}

fn initial_snake(grid: &Grid) -> Snake {
    Snake::new(grid, grid.center(), INITIAL_SNAKE_LENGTH, Right)
}

#[cfg(test)]
impl<R: Rng> GameState<R> {
    pub(crate) fn food(&self) -> Option<Coords> {
        self.food
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn pending(&self) -> Direction {
        self.pending
    }

    pub(crate) fn set_board(&mut self, body: &[Coords], direction: Direction, food: Option<Coords>) {
        self.snake = Snake::from_cells(body);
        self.direction = direction;
        self.pending = direction;
        self.food = food;
    }
}
