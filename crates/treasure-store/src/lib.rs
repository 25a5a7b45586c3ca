//! Treasure Store — durable persistence for the player record.

pub mod json_file_store;
