//! Scripted resolvers — `StageResolver` stubs that return a fixed outcome.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use treasure_core::error::{StageError, StageFailure};
use treasure_core::resolver::{BoxedResolver, StageResolver};
use treasure_core::stage::Step;

/// Shared log of the steps resolved so far, in invocation order.
#[derive(Debug, Clone, Default)]
pub struct VisitLog(Arc<Mutex<Vec<Step>>>);

impl VisitLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the visited steps.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn steps(&self) -> Vec<Step> {
        self.0.lock().unwrap().clone()
    }

    fn record(&self, step: Step) {
        self.0.lock().unwrap().push(step);
    }
}

/// A resolver that logs each invocation and returns a preset outcome.
#[derive(Debug)]
pub struct ScriptedResolver<C, O> {
    step: Step,
    outcome: Result<O, StageFailure>,
    log: VisitLog,
    _context: PhantomData<fn(&C)>,
}

impl<C, O> ScriptedResolver<C, O> {
    /// A resolver for `step` that always succeeds with `output`.
    pub fn succeeding(step: Step, output: O, log: &VisitLog) -> Self {
        Self {
            step,
            outcome: Ok(output),
            log: log.clone(),
            _context: PhantomData,
        }
    }

    /// A resolver for `step` that always fails with `reason`.
    pub fn failing(step: Step, reason: impl Into<String>, log: &VisitLog) -> Self {
        Self {
            step,
            outcome: Err(StageFailure::new(reason)),
            log: log.clone(),
            _context: PhantomData,
        }
    }
}

impl<C, O> ScriptedResolver<C, O>
where
    C: Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    /// Boxes the resolver for a sequencer slot.
    #[must_use]
    pub fn boxed(self) -> BoxedResolver<C, O> {
        Box::new(self)
    }
}

#[async_trait]
impl<C, O> StageResolver for ScriptedResolver<C, O>
where
    C: Send + Sync + 'static,
    O: Clone + Send + Sync + 'static,
{
    type Context = C;
    type Output = O;

    fn step(&self) -> Step {
        self.step
    }

    async fn resolve(&self, _context: &C) -> Result<O, StageError> {
        self.log.record(self.step);
        self.outcome.clone().map_err(StageError::from)
    }
}
