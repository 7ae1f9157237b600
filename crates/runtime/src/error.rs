//! Errors surfaced while setting up or driving a simulation.
use snake_core::{ErrorSeverity, LevelError, SnakeError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("level has no cell with a positive snake start weight")]
    NoSpawnCell,

    #[error("item {item} has no spawn table, level defines {available}")]
    UnknownItem { item: usize, available: usize },

    #[error(transparent)]
    Level(#[from] LevelError),
}

impl SnakeError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::NoSpawnCell => ErrorSeverity::Fatal,
            RuntimeError::UnknownItem { .. } => ErrorSeverity::Validation,
            RuntimeError::Level(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::NoSpawnCell => "RUNTIME_NO_SPAWN_CELL",
            RuntimeError::UnknownItem { .. } => "RUNTIME_UNKNOWN_ITEM",
            RuntimeError::Level(error) => error.error_code(),
        }
    }
}
