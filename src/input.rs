use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Direction(Direction),
    Restart,
    Quit,
}

impl GameEvent {
    /// Arrow keys or WASD steer, R restarts, Esc, Q or CTRL+C quit.
    pub fn from_key(ev: &KeyEvent) -> Option<GameEvent> {
        if is_ctrl_c(ev) {
            return Some(GameEvent::Quit);
        }

        let ev = match ev.code {
            KeyCode::Up => GameEvent::Direction(Up),
            KeyCode::Down => GameEvent::Direction(Down),
            KeyCode::Left => GameEvent::Direction(Left),
            KeyCode::Right => GameEvent::Direction(Right),
            KeyCode::Esc => GameEvent::Quit,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => GameEvent::Direction(Up),
                's' => GameEvent::Direction(Down),
                'a' => GameEvent::Direction(Left),
                'd' => GameEvent::Direction(Right),
                'r' => GameEvent::Restart,
                'q' => GameEvent::Quit,
                _ => return None,
            },
            _ => return None,
        };

        Some(ev)
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
