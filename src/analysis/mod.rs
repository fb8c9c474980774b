//! Derived analyses that run in memory on top of the storage layer:
//! - `clock`: play-by-play game clock parsing
//! - `trends`: moving averages and league-wide season series
//! - `situational`: clutch and garbage-time shooting reports

pub mod clock;
pub mod situational;
pub mod trends;

pub use situational::{
    GameSituation, PlayerSelector, SituationalAnalyzer, SituationalReport, SituationalReportRow,
};
pub use trends::{home_advantage_trend, rolling_mean};
