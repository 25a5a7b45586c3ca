//! Treasure hunt HTTP API.
//!
//! The browser page is a thin client over this server: it starts runs,
//! polls the current run view, and posts the player's choices and answers.

pub mod config;
pub mod error;
pub mod host;
pub mod routes;
pub mod state;
