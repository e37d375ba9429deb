//! Error types for the dice engine.

use thiserror::Error;

/// Result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

/// Errors that can occur when rolling dice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    /// A die must have at least one side.
    #[error("invalid die: {0} sides")]
    InvalidSides(u32),
}
