//! Error types for the shooter core.
//!
//! Gameplay itself never fails; errors only come from the high-score file and
//! from asking for a stage outside the six defined ones.

use std::io;

/// Problems reading or writing the three-line high-score record.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt score on line {line}: {content:?}")]
    Corrupt { line: usize, content: String },

    #[error("Expected 3 score lines, found {0}")]
    MissingLines(usize),
}

/// Main error type for the game.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Stage {0} is not defined")]
    StageOutOfRange(u8),
}

pub type GameResult<T> = Result<T, GameError>;
