//! CLI subcommand implementations.

pub mod download;
pub mod game;
pub mod podcast;
pub mod search;
pub mod videos;
