//! Core utilities shared across the application:
//! - `cache`: LRU + file system response cache
//! - `http`: stats.nba.com request headers

pub mod cache;
pub mod http;

pub use cache::{try_read_to_string, write_string, CacheKey, ResponseCacheKey, UnifiedCache};
pub use http::stats_header_map;
