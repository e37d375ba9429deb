//! Error types for the initiative tracker.

use thiserror::Error;

use crate::choice::ChoiceCategory;
use crate::creature::CreatureId;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors that can occur while running an encounter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// The requested creature ID does not exist in the roster.
    #[error("no such creature: {0}")]
    UnknownCreature(CreatureId),

    /// No creature with the given name exists in the roster.
    #[error("no creature named \"{0}\"")]
    UnknownName(String),

    /// The creature's choice for this category has been confirmed; the
    /// frozen total may not be altered.
    #[error("{category} choice is confirmed and can no longer change")]
    ChoiceConfirmed {
        /// The category that was targeted.
        category: ChoiceCategory,
    },

    /// Confirmation requires at least one live choice.
    #[error("nothing to confirm for creature {0}")]
    NothingToConfirm(CreatureId),

    /// The creature's total is already confirmed.
    #[error("creature {0} is already confirmed this round")]
    AlreadyConfirmed(CreatureId),

    /// Invalid session command or argument.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// A dice engine failure (invalid die size).
    #[error("{0}")]
    Dice(#[from] rk_dice::DiceError),
}
