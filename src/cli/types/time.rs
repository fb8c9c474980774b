//! Season types: the `2023-24` form used by stats.nba.com and the
//! five-digit `season_id` encoding used by the dataset tables.

use crate::error::{NbaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An NBA season identified by the calendar year it starts in.
///
/// Displays as `2023-24`; parses either `2023-24` or a bare `2023`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(start_year: u16) -> Self {
        Self(start_year)
    }

    pub fn start_year(&self) -> u16 {
        self.0
    }

    /// Two-digit suffix of the year the season ends in (`24` for 2023-24).
    pub fn end_suffix(&self) -> u16 {
        (self.0 + 1) % 100
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2023)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.0, self.end_suffix())
    }
}

impl FromStr for Season {
    type Err = NbaError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NbaError::InvalidSeason {
            value: s.to_string(),
        };
        let s = s.trim();
        let (year_part, suffix_part) = match s.split_once('-') {
            Some((year, suffix)) => (year, Some(suffix)),
            None => (s, None),
        };

        if year_part.len() != 4 {
            return Err(invalid());
        }
        let start_year: u16 = year_part.parse().map_err(|_| invalid())?;
        let season = Self(start_year);

        if let Some(suffix) = suffix_part {
            let suffix: u16 = suffix.parse().map_err(|_| invalid())?;
            if suffix_part.map(str::len) != Some(2) || suffix != season.end_suffix() {
                return Err(invalid());
            }
        }

        Ok(season)
    }
}

/// Season phase encoded in the first digit of a dataset `season_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    PreSeason,
    Regular,
    AllStar,
    Playoffs,
    PlayIn,
    Unknown,
}

impl From<u32> for SeasonType {
    fn from(digit: u32) -> Self {
        match digit {
            1 => Self::PreSeason,
            2 => Self::Regular,
            3 => Self::AllStar,
            4 => Self::Playoffs,
            5 => Self::PlayIn,
            _ => Self::Unknown,
        }
    }
}

/// Dataset season identifier, e.g. `22023` = regular season 2023-24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeasonId(pub u32);

impl SeasonId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn kind(&self) -> SeasonType {
        SeasonType::from(self.0 / 10000)
    }

    pub fn season(&self) -> Season {
        Season((self.0 % 10000) as u16)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SeasonId {
    type Err = NbaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != 5 {
            return Err(NbaError::InvalidSeason {
                value: s.to_string(),
            });
        }
        s.parse().map(Self).map_err(|_| NbaError::InvalidSeason {
            value: s.to_string(),
        })
    }
}
