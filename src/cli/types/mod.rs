//! Type-safe wrappers for NBA identifiers and seasons.

pub mod ids;
pub mod time;

pub use ids::{GameId, PlayerId, TeamId};
pub use time::{Season, SeasonId, SeasonType};
