//! Stage resolver abstraction.

use async_trait::async_trait;

use crate::error::StageError;
use crate::stage::Step;

/// One step of the expedition.
///
/// A resolver receives the success payload of an earlier step it depends on
/// and produces exactly one outcome per invocation: `Ok` lets the sequencer
/// advance, `Err(StageError::Failure)` ends the run.
#[async_trait]
pub trait StageResolver: Send + Sync {
    /// Payload from an earlier step that this resolver consumes.
    type Context: Send + Sync;

    /// Success payload handed back to the sequencer.
    type Output: Send;

    /// The pipeline step this resolver implements.
    fn step(&self) -> Step;

    /// Resolve the step.
    async fn resolve(&self, context: &Self::Context) -> Result<Self::Output, StageError>;
}

/// A resolver behind a trait object, as held by the sequencer.
pub type BoxedResolver<C, O> = Box<dyn StageResolver<Context = C, Output = O>>;
