//! Domain layer: commands, outcomes, narration and the stage resolvers.

pub mod commands;
pub mod narrative;
pub mod outcomes;
pub mod resolvers;
