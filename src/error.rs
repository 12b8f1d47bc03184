//! Error types for the Reversi engine

use thiserror::Error;

use crate::types::Action;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board size {size}: must be even and between 4 and 26")]
    InvalidBoardSize { size: usize },

    #[error("illegal move: action {action}")]
    IllegalMove { action: Action },

    #[error("invalid coordinate '{input}'")]
    InvalidCoordinate { input: String },

    #[error("action {action} is out of range for a {size}x{size} board")]
    ActionOutOfRange { action: Action, size: usize },

    #[error("game is already over")]
    GameOver,

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the turn loop should report the error and prompt again
    /// instead of aborting the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::IllegalMove { .. }
                | Error::InvalidCoordinate { .. }
                | Error::ActionOutOfRange { .. }
                | Error::GameOver
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_and_coordinate_errors_are_recoverable() {
        assert!(Error::IllegalMove { action: 3 }.is_recoverable());
        assert!(
            Error::InvalidCoordinate {
                input: "Z9".to_string()
            }
            .is_recoverable()
        );
        assert!(!Error::InvalidBoardSize { size: 5 }.is_recoverable());
        assert!(
            !Error::Io(std::io::Error::other("closed")).is_recoverable()
        );
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = Error::ActionOutOfRange { action: 40, size: 6 };
        assert_eq!(err.to_string(), "action 40 is out of range for a 6x6 board");
    }
}
