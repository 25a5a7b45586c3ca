//! Application layer: the sequencer and the player-record handlers.

pub mod command_handlers;
pub mod query_handlers;
pub mod sequencer;
