//! Presentation sink abstraction.
//!
//! The sequencer and the stage resolvers talk to the player only through
//! this trait. Each prompt call owns its option set for the duration of the
//! call; nothing is shared between prompts.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::stage::Stage;

/// Renders narration and collects the player's input.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    /// Show a line of narration.
    async fn show_text(&self, message: &str) -> Result<(), DomainError>;

    /// Switch the scenery to the given stage.
    async fn show_image(&self, stage: Stage) -> Result<(), DomainError>;

    /// Offer the labelled options and wait for exactly one selection.
    /// Returns the selected label.
    async fn present_choices(&self, options: &[&str]) -> Result<String, DomainError>;

    /// Open a free-text field and wait for the confirm event carrying the
    /// typed string.
    async fn present_text_input(&self) -> Result<String, DomainError>;
}

/// Checks that `selection` is one of the offered `options` and returns its
/// position.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the label was not offered.
pub fn position_of(options: &[&str], selection: &str) -> Result<usize, DomainError> {
    options
        .iter()
        .position(|option| *option == selection)
        .ok_or_else(|| DomainError::Validation(format!("'{selection}' was not offered")))
}
