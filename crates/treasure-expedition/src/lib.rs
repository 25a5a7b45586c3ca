//! Treasure hunt — the expedition context.
//!
//! Responsible for the fixed pipeline of stages from the library clue to the
//! dig site, the resolution policy of each stage, and recording every run in
//! the player's history.

pub mod application;
pub mod domain;
