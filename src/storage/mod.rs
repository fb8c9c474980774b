//! Storage layer over the local NBA SQLite database
//!
//! The database holds the 16 dataset tables plus the tables written by the
//! loader (`player_info`, `player_stats`, `game_log`, `game_pbp`):
//! - `models`: Data structures
//! - `schema`: Connection, dynamic table management and `fetch_log`
//! - `values`: JSON / SQLite value coercion
//! - `queries`: Loader writes and lookups
//! - `analysis`: SQL-backed season analyses and the late-game event read

pub mod analysis;
pub mod models;
pub mod queries;
pub mod schema;
pub mod values;

#[cfg(test)]
mod tests;

pub use analysis::TREND_WINDOW;
pub use models::*;
pub use schema::{validate_identifier, NbaDatabase};
