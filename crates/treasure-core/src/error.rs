//! Error types.

use thiserror::Error;

/// The single game-level failure: a stage resolved to a losing outcome.
///
/// The display form is the bare reason so it can be shown to the player and
/// written to the play history unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct StageFailure {
    /// Player-facing reason the run ended.
    pub reason: String,
}

impl StageFailure {
    /// Creates a failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Faults raised by collaborators rather than by the game rules.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The presentation sink went away before delivering a selection.
    #[error("presentation error: {0}")]
    Presentation(String),

    /// Input that does not match what was asked for.
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation that requires exclusive access found it taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A storage or runtime error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

/// Error returned by a stage resolver.
#[derive(Debug, Error)]
pub enum StageError {
    /// The stage was lost; terminates the run.
    #[error(transparent)]
    Failure(#[from] StageFailure),

    /// A collaborator failed while the stage was pending.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
