use std::collections::VecDeque;
use std::fmt;

use crate::{Coords, TermInt};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step `(dx, dy)` for this direction. `y` grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The starting snake has no cells.
    NoSnake,
    /// One of the dimensions is zero.
    Empty { width: TermInt, height: TermInt },
    /// Not wide enough to lay out the starting snake.
    TooNarrow { width: TermInt, min: TermInt },
    /// The starting snake would leave no room for food.
    NoRoomForFood { width: TermInt, height: TermInt },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::NoSnake => write!(f, "the starting snake needs at least one cell"),
            GridError::Empty { width, height } => {
                write!(f, "a {}x{} grid has no cells", width, height)
            }
            GridError::TooNarrow { width, min } => {
                write!(f, "grid width {} is below the minimum of {}", width, min)
            }
            GridError::NoRoomForFood { width, height } => {
                write!(f, "a {}x{} grid has no free cell left for food", width, height)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Toroidal playing field. Moving off one edge re-enters on the opposite one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: TermInt,
    height: TermInt,
}

impl Grid {
    pub fn new(width: TermInt, height: TermInt, snake_len: TermInt) -> Result<Self, GridError> {
        if snake_len == 0 {
            return Err(GridError::NoSnake);
        }
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        if width < snake_len {
            return Err(GridError::TooNarrow { width, min: snake_len });
        }
        if (width as usize) * (height as usize) <= snake_len as usize {
            return Err(GridError::NoRoomForFood { width, height });
        }
        Ok(Grid { width, height })
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    #[cfg(test)]
    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 < self.width && pos.1 < self.height
    }

    pub fn step(&self, pos: Coords, dir: Direction) -> Coords {
        let (dx, dy) = dir.delta();
        let (w, h) = (self.width as i32, self.height as i32);
        let x = (pos.0 as i32 + dx).rem_euclid(w);
        let y = (pos.1 as i32 + dy).rem_euclid(h);
        (x as TermInt, y as TermInt)
    }

    pub fn cells(&self) -> impl Iterator<Item = Coords> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }

    #[cfg(test)]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Head-first body of the snake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>,
}

impl Snake {
    /// Lays out `size` cells ending at `head`, trailing away from `direction`.
    pub fn new(grid: &Grid, head: Coords, size: TermInt, direction: Direction) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(size as usize);
        let mut pos = head;

        for _ in 0..size {
            body.push_back(pos);
            pos = grid.step(pos, back);
        }

        Snake { body }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Coords]) -> Self {
        Snake { body: cells.iter().copied().collect() }
    }

    pub fn head(&self) -> Coords {
        // Never empty: Grid::new rejects a zero-length snake and a move
        // only pops after pushing.
        self.body[0]
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = Coords> + '_ {
        self.body.iter().copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    /// Pushes a new head. The tail is only dropped when `grow` is false.
    /// Returns the dropped tail, if any.
    pub fn push_head(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);
        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(30, 20, 3).unwrap()
    }

    #[test]
    fn opposite_is_involutive() {
        for dir in [Up, Down, Left, Right] {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn step_always_stays_on_the_grid() {
        let grid = Grid::new(5, 3, 3).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.area());

        for pos in cells {
            for dir in [Up, Down, Left, Right] {
                assert!(grid.contains(grid.step(pos, dir)));
            }
        }
    }

    #[test]
    fn step_wraps_at_every_edge() {
        let grid = grid();
        assert_eq!(grid.step((0, 10), Left), (29, 10));
        assert_eq!(grid.step((29, 10), Right), (0, 10));
        assert_eq!(grid.step((5, 0), Up), (5, 19));
        assert_eq!(grid.step((5, 19), Down), (5, 0));
        assert_eq!(grid.step((15, 10), Up), (15, 9));
    }

    #[test]
    fn grid_rejects_unusable_sizes() {
        assert_eq!(Grid::new(2, 10, 3), Err(GridError::TooNarrow { width: 2, min: 3 }));
        assert_eq!(Grid::new(3, 0, 3), Err(GridError::Empty { width: 3, height: 0 }));
        assert_eq!(Grid::new(3, 1, 3), Err(GridError::NoRoomForFood { width: 3, height: 1 }));
        assert!(Grid::new(4, 1, 3).is_ok());
    }

    #[test]
    fn grid_rejects_zero_length_snake() {
        assert_eq!(Grid::new(30, 20, 0), Err(GridError::NoSnake));
        assert_eq!(Grid::new(0, 0, 0), Err(GridError::NoSnake));

        let grid = Grid::new(30, 20, 1).unwrap();
        let snake = Snake::new(&grid, grid.center(), 1, Right);
        assert_eq!(snake.head(), (15, 10));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn new_snake_trails_behind_its_head() {
        let grid = grid();
        let snake = Snake::new(&grid, grid.center(), 3, Right);
        assert_eq!(snake.body().collect::<Vec<_>>(), vec![(15, 10), (14, 10), (13, 10)]);
        assert_eq!(snake.head(), (15, 10));
    }

    #[test]
    fn push_head_grows_only_when_asked() {
        let grid = grid();
        let mut snake = Snake::new(&grid, (15, 10), 3, Right);

        assert_eq!(snake.push_head((16, 10), false), Some((13, 10)));
        assert_eq!(snake.len(), 3);

        assert_eq!(snake.push_head((17, 10), true), None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), (17, 10));
    }
}
