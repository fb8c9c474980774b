//! HTTP header utilities for stats.nba.com
//!
//! The site rejects or stalls requests that do not look like they come from
//! the nba.com web app, so every request carries browser-like headers.

use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ORIGIN, REFERER, USER_AGENT};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Overrides the User-Agent sent to stats.nba.com.
pub const USER_AGENT_ENV_VAR: &str = "NBA_STATS_USER_AGENT";

/// Default headers for stats.nba.com requests.
pub fn stats_header_map() -> Result<HeaderMap> {
    let user_agent =
        std::env::var(USER_AGENT_ENV_VAR).unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

    let mut h = HeaderMap::new();
    h.insert(USER_AGENT, HeaderValue::from_str(&user_agent)?);
    h.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    h.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    h.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
    h.insert(
        HeaderName::from_static("x-nba-stats-origin"),
        HeaderValue::from_static("stats"),
    );
    h.insert(
        HeaderName::from_static("x-nba-stats-token"),
        HeaderValue::from_static("true"),
    );
    Ok(h)
}
