//! Fixed game settings. None of these can be changed at runtime.
use std::time::Duration;

use crate::TermInt;

/// Playing field size, in cells.
pub const GRID_WIDTH: TermInt = 30;
pub const GRID_HEIGHT: TermInt = 20;

/// Terminal columns used to draw one cell, so cells come out roughly square.
pub const CELL_WIDTH: TermInt = 2;

pub const INITIAL_SNAKE_LENGTH: TermInt = 3;

/// Ticks per second at score zero.
pub const BASE_TICK_RATE: u32 = 10;
/// Every this many points the tick rate goes up by one.
pub const SPEED_STEP_POINTS: u32 = 5;
pub const MAX_TICK_RATE: u32 = 30;

/// Time between two ticks at the given score.
pub fn tick_interval(score: u32) -> Duration {
    let rate = (BASE_TICK_RATE + score / SPEED_STEP_POINTS).min(MAX_TICK_RATE);
    Duration::from_millis(1000 / rate as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speeds_up_every_five_points() {
        assert_eq!(tick_interval(0), Duration::from_millis(100));
        assert_eq!(tick_interval(4), Duration::from_millis(100));
        assert_eq!(tick_interval(5), Duration::from_millis(90));
        assert_eq!(tick_interval(9), Duration::from_millis(90));
        assert_eq!(tick_interval(10), Duration::from_millis(83));
        assert_eq!(tick_interval(15), Duration::from_millis(76));
    }

    #[test]
    fn speed_is_capped() {
        let fastest = Duration::from_millis(1000 / MAX_TICK_RATE as u64);
        assert_eq!(tick_interval(100), fastest);
        assert_eq!(tick_interval(u32::MAX), fastest);
    }
}
