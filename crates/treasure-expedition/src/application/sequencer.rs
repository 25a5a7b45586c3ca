//! The stage sequencer.
//!
//! Drives the fixed pipeline from the library clue to the dig site. Steps
//! run strictly one after another; the first `StageFailure` stops the run,
//! and every finished run (completed or aborted) is appended to the player's
//! history.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use treasure_core::error::{DomainError, StageError};
use treasure_core::presentation::PresentationSink;
use treasure_core::record::PlayerRecordStore;
use treasure_core::resolver::{BoxedResolver, StageResolver};
use treasure_core::time::Delay;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::commands::RecordRunResult;
use crate::domain::narrative;
use crate::domain::outcomes::{ForestCrossing, GuardPassage, RunOutcome};
use crate::domain::resolvers::{
    ChamberResolver, DecodeScriptResolver, DigResolver, ForestResolver, GuardResolver,
    InitialClueResolver, MountainResolver, PuzzleResolver, RiverResolver, SharedRng,
};

/// Tunables for the standard expedition.
#[derive(Debug, Clone)]
pub struct ExpeditionConfig {
    /// Readings the ancient script can decode to.
    pub readings: Vec<String>,
    /// Cap on puzzle answers; `None` keeps the puzzle open indefinitely.
    pub puzzle_max_attempts: Option<u32>,
}

impl Default for ExpeditionConfig {
    fn default() -> Self {
        Self {
            readings: vec![narrative::DECODED_CLUE.to_owned()],
            puzzle_max_attempts: None,
        }
    }
}

/// One resolver per pipeline step.
pub struct Expedition {
    pub initial_clue: BoxedResolver<(), String>,
    pub decode_script: BoxedResolver<String, String>,
    pub climb_mountain: BoxedResolver<(), String>,
    pub cross_forest: BoxedResolver<(), ForestCrossing>,
    pub cross_river: BoxedResolver<(), String>,
    pub find_chamber: BoxedResolver<String, String>,
    pub solve_puzzle: BoxedResolver<String, String>,
    pub guard_encounter: BoxedResolver<(), GuardPassage>,
    pub dig_for_treasure: BoxedResolver<String, String>,
}

impl Expedition {
    /// Builds the standard set of resolvers over the given collaborators.
    #[must_use]
    pub fn standard(
        sink: &Arc<dyn PresentationSink>,
        delay: &Arc<dyn Delay>,
        rng: &SharedRng,
        config: ExpeditionConfig,
    ) -> Self {
        Self {
            initial_clue: Box::new(InitialClueResolver::new(Arc::clone(delay))),
            decode_script: Box::new(DecodeScriptResolver::new(
                Arc::clone(delay),
                Arc::clone(rng),
                config.readings,
            )),
            climb_mountain: Box::new(MountainResolver::new(Arc::clone(sink))),
            cross_forest: Box::new(ForestResolver::new(
                Arc::clone(delay),
                Arc::clone(rng),
                Arc::clone(sink),
            )),
            cross_river: Box::new(RiverResolver::new(Arc::clone(sink))),
            find_chamber: Box::new(ChamberResolver::new(Arc::clone(delay))),
            solve_puzzle: Box::new(PuzzleResolver::new(
                Arc::clone(sink),
                config.puzzle_max_attempts,
            )),
            guard_encounter: Box::new(GuardResolver::new(Arc::clone(sink))),
            dig_for_treasure: Box::new(DigResolver::new(Arc::clone(delay))),
        }
    }
}

/// Runs expeditions and records their results.
///
/// `run_game` takes `&mut self`, so a sequencer can never have two runs, or
/// two pending resolvers, in flight at once.
pub struct Sequencer {
    expedition: Expedition,
    sink: Arc<dyn PresentationSink>,
    store: Arc<dyn PlayerRecordStore>,
}

impl Sequencer {
    /// Creates a sequencer over the given resolvers and collaborators.
    pub fn new(
        expedition: Expedition,
        sink: Arc<dyn PresentationSink>,
        store: Arc<dyn PlayerRecordStore>,
    ) -> Self {
        Self {
            expedition,
            sink,
            store,
        }
    }

    /// Runs the expedition from the first step.
    ///
    /// Every call starts clean; nothing from an earlier run is carried over.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if a collaborator fails. Such a run is not a
    /// game-over and is not written to the history.
    #[instrument(skip(self), fields(run_id = %Uuid::new_v4()))]
    pub async fn run_game(&mut self) -> Result<RunOutcome, DomainError> {
        info!("expedition started");

        let outcome = match self.run_steps().await {
            Ok(final_message) => RunOutcome::Completed(final_message),
            Err(StageError::Failure(failure)) => {
                // The abort is recorded even if the banner cannot be shown.
                if let Err(err) = self
                    .sink
                    .show_text(&narrative::failure_banner(&failure.reason))
                    .await
                {
                    warn!(error = %err, "failure banner not shown");
                }
                RunOutcome::Aborted(failure.reason)
            }
            Err(StageError::Domain(err)) => {
                warn!(error = %err, "expedition interrupted");
                return Err(err);
            }
        };

        let command = RecordRunResult {
            correlation_id: Uuid::new_v4(),
            entry: outcome.history_entry().to_owned(),
        };
        command_handlers::handle_record_run_result(&command, self.store.as_ref()).await?;

        info!(outcome = ?outcome, "expedition finished");
        Ok(outcome)
    }

    async fn run_steps(&self) -> Result<String, StageError> {
        let expedition = &self.expedition;

        let clue = self.resolve(expedition.initial_clue.as_ref(), &()).await?;
        self.sink.show_text(&clue).await?;

        let decoded = self.resolve(expedition.decode_script.as_ref(), &clue).await?;
        self.sink
            .show_text(&narrative::decoded_clue_message(&decoded))
            .await?;

        self.resolve(expedition.climb_mountain.as_ref(), &()).await?;
        self.sink.show_text(narrative::CLIMB_NARRATION).await?;

        let crossing = self.resolve(expedition.cross_forest.as_ref(), &()).await?;
        self.sink.show_text(crossing.narration()).await?;

        self.resolve(expedition.cross_river.as_ref(), &()).await?;
        self.sink.show_text(narrative::RIVER_NARRATION).await?;

        let chamber = self.resolve(expedition.find_chamber.as_ref(), &decoded).await?;
        self.sink.show_text(&chamber).await?;

        let solved = self.resolve(expedition.solve_puzzle.as_ref(), &chamber).await?;
        self.sink.show_text(&solved).await?;

        let passage = self.resolve(expedition.guard_encounter.as_ref(), &()).await?;
        info!(password = %passage.password, "guard passed");
        self.sink.show_text(narrative::GUARD_NARRATION).await?;

        let treasure = self.resolve(expedition.dig_for_treasure.as_ref(), &solved).await?;
        self.sink.show_text(&treasure).await?;

        Ok(treasure)
    }

    /// Announces the step's stage, if it opens one, then awaits its resolver.
    #[instrument(skip_all, fields(step = %resolver.step()))]
    async fn resolve<C, O>(
        &self,
        resolver: &dyn StageResolver<Context = C, Output = O>,
        context: &C,
    ) -> Result<O, StageError>
    where
        C: Send + Sync,
        O: Send,
    {
        let step = resolver.step();
        if let Some(banner) = narrative::stage_banner(step) {
            self.sink.show_text(&banner).await?;
        }
        if let Some(stage) = step.stage() {
            self.sink.show_image(stage).await?;
        }

        info!(step = %step, "entering step");
        match resolver.resolve(context).await {
            Ok(output) => Ok(output),
            Err(StageError::Failure(failure)) => {
                info!(step = %step, reason = %failure.reason, "step failed");
                Err(failure.into())
            }
            Err(err) => Err(err),
        }
    }
}
