//! Treasure Core — shared abstractions for the treasure hunt.
//!
//! This crate defines the traits and types that the expedition, the
//! persistence adapter and the HTTP surface all depend on: the stage
//! identifiers, the resolver contract, the presentation and record-store
//! collaborators, and the injectable time and randomness capabilities.
//! It contains no infrastructure code.

pub mod error;
pub mod presentation;
pub mod record;
pub mod resolver;
pub mod rng;
pub mod stage;
pub mod time;
