pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod session;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::Config;
pub use error::{Error, Result};
pub use game::ReversiEngine;
pub use types::{Action, Cell, Player, Position, Score, StepOutcome};
