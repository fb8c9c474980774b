//! Command implementations for the nba-stats CLI

pub mod analyze;
pub mod common;
pub mod fetch;
pub mod init;
pub mod tables;
