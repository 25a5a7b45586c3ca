//! The concrete stage resolvers.
//!
//! Timed stages wait on the injected `Delay`; choice stages go through the
//! injected `PresentationSink`; random branches draw from the injected
//! `DeterministicRng`. Every resolver produces exactly one outcome per call.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use treasure_core::error::{DomainError, StageError, StageFailure};
use treasure_core::presentation::{PresentationSink, position_of};
use treasure_core::resolver::StageResolver;
use treasure_core::rng::DeterministicRng;
use treasure_core::stage::Step;
use treasure_core::time::Delay;

use super::narrative;
use super::outcomes::{ForestCrossing, GuardPassage};

/// RNG shared between the resolvers that draw random branches.
pub type SharedRng = Arc<Mutex<dyn DeterministicRng>>;

/// Pause before the first clue turns up.
pub const INITIAL_CLUE_DELAY: Duration = Duration::from_millis(1000);
/// Time spent decoding the ancient script.
pub const DECODE_DELAY: Duration = Duration::from_millis(1500);
/// Time spent in the forest before its event is drawn.
pub const FOREST_DELAY: Duration = Duration::from_millis(2500);
/// Time spent searching for the hidden chamber.
pub const CHAMBER_DELAY: Duration = Duration::from_millis(2000);
/// Time spent digging.
pub const DIG_DELAY: Duration = Duration::from_millis(3000);

fn draw_range(rng: &SharedRng, min: u32, max: u32) -> Result<u32, DomainError> {
    let mut guard = rng
        .lock()
        .map_err(|_| DomainError::Infrastructure("rng lock poisoned".into()))?;
    Ok(guard.next_u32_range(min, max))
}

fn draw_index(rng: &SharedRng, len: usize) -> Result<usize, DomainError> {
    let mut guard = rng
        .lock()
        .map_err(|_| DomainError::Infrastructure("rng lock poisoned".into()))?;
    Ok(guard.pick_index(len))
}

/// Finds the first clue in the library.
pub struct InitialClueResolver {
    delay: Arc<dyn Delay>,
}

impl InitialClueResolver {
    /// Creates the resolver.
    pub fn new(delay: Arc<dyn Delay>) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl StageResolver for InitialClueResolver {
    type Context = ();
    type Output = String;

    fn step(&self) -> Step {
        Step::InitialClue
    }

    async fn resolve(&self, _context: &()) -> Result<String, StageError> {
        self.delay.wait(INITIAL_CLUE_DELAY).await;
        Ok(narrative::INITIAL_CLUE.to_owned())
    }
}

/// Decodes the clue by drawing one entry from a fixed set of readings.
///
/// An empty reading set decodes to an empty clue, which the hidden-chamber
/// stage treats as a lost trail.
pub struct DecodeScriptResolver {
    delay: Arc<dyn Delay>,
    rng: SharedRng,
    readings: Vec<String>,
}

impl DecodeScriptResolver {
    /// Creates the resolver over the given readings.
    pub fn new(delay: Arc<dyn Delay>, rng: SharedRng, readings: Vec<String>) -> Self {
        Self {
            delay,
            rng,
            readings,
        }
    }
}

#[async_trait]
impl StageResolver for DecodeScriptResolver {
    type Context = String;
    type Output = String;

    fn step(&self) -> Step {
        Step::DecodeScript
    }

    async fn resolve(&self, clue: &String) -> Result<String, StageError> {
        debug!(clue = %clue, readings = self.readings.len(), "decoding clue");
        let decoded = if self.readings.is_empty() {
            String::new()
        } else {
            let index = draw_index(&self.rng, self.readings.len())?;
            self.readings[index].clone()
        };
        self.delay.wait(DECODE_DELAY).await;
        Ok(decoded)
    }
}

/// Climb on or give up.
pub struct MountainResolver {
    sink: Arc<dyn PresentationSink>,
}

impl MountainResolver {
    /// Creates the resolver.
    pub fn new(sink: Arc<dyn PresentationSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl StageResolver for MountainResolver {
    type Context = ();
    type Output = String;

    fn step(&self) -> Step {
        Step::ClimbMountain
    }

    async fn resolve(&self, _context: &()) -> Result<String, StageError> {
        let options = [narrative::CLIMB_OPTION, narrative::GIVE_UP_OPTION];
        let selection = self.sink.present_choices(&options).await?;
        match position_of(&options, &selection)? {
            0 => Ok(narrative::CLIMB_SUCCESS.to_owned()),
            _ => Err(StageFailure::new(narrative::GAVE_UP).into()),
        }
    }
}

/// Crosses the forest: one of three events, each equally likely.
pub struct ForestResolver {
    delay: Arc<dyn Delay>,
    rng: SharedRng,
    sink: Arc<dyn PresentationSink>,
}

impl ForestResolver {
    /// Creates the resolver.
    pub fn new(delay: Arc<dyn Delay>, rng: SharedRng, sink: Arc<dyn PresentationSink>) -> Self {
        Self { delay, rng, sink }
    }

    async fn handle_trap(&self) -> Result<ForestCrossing, StageError> {
        self.sink.show_text(narrative::FOREST_TRAP).await?;
        let options = [narrative::REST_OPTION, narrative::GIVE_UP_OPTION];
        let selection = self.sink.present_choices(&options).await?;
        match position_of(&options, &selection)? {
            0 => Ok(ForestCrossing::RestedAfterTrap),
            _ => Err(StageFailure::new(narrative::GAVE_UP).into()),
        }
    }
}

#[async_trait]
impl StageResolver for ForestResolver {
    type Context = ();
    type Output = ForestCrossing;

    fn step(&self) -> Step {
        Step::CrossForest
    }

    async fn resolve(&self, _context: &()) -> Result<ForestCrossing, StageError> {
        self.delay.wait(FOREST_DELAY).await;
        let event = draw_range(&self.rng, 1, 3)?;
        debug!(event, "forest event drawn");
        match event {
            1 => Ok(ForestCrossing::Unhindered),
            2 => self.handle_trap().await,
            _ => Ok(ForestCrossing::FoundRelic),
        }
    }
}

/// Picks a way across the river.
pub struct RiverResolver {
    sink: Arc<dyn PresentationSink>,
}

impl RiverResolver {
    /// Creates the resolver.
    pub fn new(sink: Arc<dyn PresentationSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl StageResolver for RiverResolver {
    type Context = ();
    type Output = String;

    fn step(&self) -> Step {
        Step::CrossRiver
    }

    async fn resolve(&self, _context: &()) -> Result<String, StageError> {
        self.sink.show_text(narrative::RIVER_INTRO).await?;
        let options = [
            narrative::RAFT_OPTION,
            narrative::ROPE_OPTION,
            narrative::SWIM_OPTION,
        ];
        let selection = self.sink.present_choices(&options).await?;
        match position_of(&options, &selection)? {
            0 => Ok(narrative::RAFT_SUCCESS.to_owned()),
            1 => Err(StageFailure::new(narrative::ROPE_FAILURE).into()),
            _ => Err(StageFailure::new(narrative::SWIM_FAILURE).into()),
        }
    }
}

/// Follows the decoded clue to the hidden chamber.
pub struct ChamberResolver {
    delay: Arc<dyn Delay>,
}

impl ChamberResolver {
    /// Creates the resolver.
    pub fn new(delay: Arc<dyn Delay>) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl StageResolver for ChamberResolver {
    type Context = String;
    type Output = String;

    fn step(&self) -> Step {
        Step::FindChamber
    }

    async fn resolve(&self, decoded_clue: &String) -> Result<String, StageError> {
        self.delay.wait(CHAMBER_DELAY).await;
        if decoded_clue.is_empty() {
            return Err(StageFailure::new(narrative::CHAMBER_LOST).into());
        }
        Ok(narrative::CHAMBER_FOUND.to_owned())
    }
}

/// The map puzzle. Wrong answers keep the input open for another try.
pub struct PuzzleResolver {
    sink: Arc<dyn PresentationSink>,
    max_attempts: Option<u32>,
}

impl PuzzleResolver {
    /// Creates the resolver. With `max_attempts` set, the wrong answer that
    /// uses up the last attempt ends the run.
    pub fn new(sink: Arc<dyn PresentationSink>, max_attempts: Option<u32>) -> Self {
        Self { sink, max_attempts }
    }

    /// Evaluates one confirmed answer.
    ///
    /// # Errors
    ///
    /// Returns a `StageFailure` for anything but the exact solution.
    pub fn attempt(&self, answer: &str) -> Result<String, StageFailure> {
        if answer == narrative::PUZZLE_SOLUTION {
            Ok(narrative::PUZZLE_SOLVED.to_owned())
        } else {
            Err(StageFailure::new(narrative::PUZZLE_WRONG))
        }
    }
}

#[async_trait]
impl StageResolver for PuzzleResolver {
    type Context = String;
    type Output = String;

    fn step(&self) -> Step {
        Step::SolvePuzzle
    }

    async fn resolve(&self, _chamber: &String) -> Result<String, StageError> {
        let mut attempts: u32 = 0;
        loop {
            let answer = self.sink.present_text_input().await?;
            attempts = attempts.saturating_add(1);
            match self.attempt(&answer) {
                Ok(solved) => return Ok(solved),
                Err(failure) => {
                    debug!(attempts, "wrong puzzle answer");
                    if self.max_attempts.is_some_and(|max| attempts >= max) {
                        return Err(failure.into());
                    }
                    self.sink.show_text(narrative::PUZZLE_RETRY_HINT).await?;
                }
            }
        }
    }
}

/// Deals with the guard at the treasure site.
pub struct GuardResolver {
    sink: Arc<dyn PresentationSink>,
}

impl GuardResolver {
    /// Creates the resolver.
    pub fn new(sink: Arc<dyn PresentationSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl StageResolver for GuardResolver {
    type Context = ();
    type Output = GuardPassage;

    fn step(&self) -> Step {
        Step::GuardEncounter
    }

    async fn resolve(&self, _context: &()) -> Result<GuardPassage, StageError> {
        let options = [
            narrative::HAND_OVER_OPTION,
            narrative::FIGHT_OPTION,
            narrative::FLEE_OPTION,
        ];
        let selection = self.sink.present_choices(&options).await?;
        match position_of(&options, &selection)? {
            0 => {
                self.sink
                    .show_text(&narrative::password_reveal(narrative::GUARD_PASSWORD))
                    .await?;
                Ok(GuardPassage {
                    password: narrative::GUARD_PASSWORD.to_owned(),
                    message: narrative::GUARD_PASSED.to_owned(),
                })
            }
            1 => Err(StageFailure::new(narrative::FIGHT_FAILURE).into()),
            _ => Err(StageFailure::new(narrative::FLEE_FAILURE).into()),
        }
    }
}

/// Digs where the solved map points.
pub struct DigResolver {
    delay: Arc<dyn Delay>,
}

impl DigResolver {
    /// Creates the resolver.
    pub fn new(delay: Arc<dyn Delay>) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl StageResolver for DigResolver {
    type Context = String;
    type Output = String;

    fn step(&self) -> Step {
        Step::DigForTreasure
    }

    async fn resolve(&self, _location: &String) -> Result<String, StageError> {
        self.delay.wait(DIG_DELAY).await;
        Ok(narrative::TREASURE_FOUND.to_owned())
    }
}
