//! ID types for NBA players, teams and games.

use crate::error::{NbaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for NBA player IDs (`PERSON_ID` / `personId`).
///
/// # Examples
///
/// ```rust
/// use nba_stats::PlayerId;
///
/// let id: PlayerId = "201939".parse().unwrap();
/// assert_eq!(id.as_u64(), 201939);
/// assert_eq!(id.to_string(), "201939");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// SQLite stores integers as i64.
    pub fn as_i64(&self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = NbaError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| NbaError::InvalidPlayerId {
                value: s.to_string(),
            })
    }
}

/// Type-safe wrapper for NBA team IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u64);

impl TeamId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NBA game ID such as `0022300061`.
///
/// Kept as text: the leading zeros are significant to stats.nba.com.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GameId {
    type Err = NbaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(NbaError::InvalidGameId {
                value: s.to_string(),
            });
        }
        // Short numeric forms (22300061) are padded back to ten digits.
        Ok(Self(format!("{s:0>10}")))
    }
}
