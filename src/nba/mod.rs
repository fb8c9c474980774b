//! stats.nba.com API access: response types and the HTTP client.

pub mod http;
pub mod types;

pub use http::{CacheStatus, NbaClient, STATS_BASE_URL};
pub use types::ResultSet;
