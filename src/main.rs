mod config;
mod game;
mod input;
mod snake;
mod state;
mod term;

use std::process::exit;

use log::error;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() {
    // Logs go to stderr, redirect it when running with RUST_LOG set.
    env_logger::init();

    let res = game::SnakeGame::new().and_then(|mut game| game.run());

    if let Err(e) = res {
        error!("{}", e);
        eprintln!("snake: {}", e);
        exit(1);
    }
}
