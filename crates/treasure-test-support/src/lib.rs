//! Shared test doubles for the treasure hunt stage sequencer.

mod clock;
mod delay;
mod resolver;
mod rng;
mod sink;
mod store;

pub use clock::FixedClock;
pub use delay::InstantDelay;
pub use resolver::{ScriptedResolver, VisitLog};
pub use rng::{MockRng, SequenceRng};
pub use sink::{ClosedSink, ScriptedSink};
pub use store::{FailingRecordStore, MemoryRecordStore};
