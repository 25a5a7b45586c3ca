//! Shared application state.

use std::sync::Arc;

use treasure_core::record::PlayerRecordStore;
use treasure_core::time::{Clock, Delay};
use treasure_expedition::application::sequencer::ExpeditionConfig;
use treasure_expedition::domain::resolvers::SharedRng;

use crate::host::RunHost;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The hosted run.
    pub host: RunHost,
    /// Player record persistence.
    pub store: Arc<dyn PlayerRecordStore>,
    /// Clock for run timestamps.
    pub clock: Arc<dyn Clock>,
    /// Timer used by timed stages.
    pub delay: Arc<dyn Delay>,
    /// Random source for the script reading and forest events.
    pub rng: SharedRng,
    /// Tunables handed to every new expedition.
    pub expedition: ExpeditionConfig,
}

impl AppState {
    /// Create new application state with an idle run host.
    #[must_use]
    pub fn new(
        store: Arc<dyn PlayerRecordStore>,
        clock: Arc<dyn Clock>,
        delay: Arc<dyn Delay>,
        rng: SharedRng,
        expedition: ExpeditionConfig,
    ) -> Self {
        Self {
            host: RunHost::new(),
            store,
            clock,
            delay,
            rng,
            expedition,
        }
    }
}
