//! Data models for the storage layer

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// How a fetched result set is written to its table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Drop and recreate the table (reference data such as the player list)
    Replace,
    /// Add rows, replacing rows with the same key
    Append,
}

/// A loader table, stored as `<category>_<name>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderTable {
    pub category: &'static str,
    pub name: &'static str,
    pub key: &'static [&'static str],
}

impl LoaderTable {
    pub fn table_name(&self) -> String {
        format!("{}_{}", self.category, self.name)
    }
}

pub const PLAYER_INFO: LoaderTable = LoaderTable {
    category: "player",
    name: "info",
    key: &["PERSON_ID"],
};

pub const PLAYER_STATS: LoaderTable = LoaderTable {
    category: "player",
    name: "stats",
    key: &["PLAYER_ID", "SEASON_ID", "TEAM_ID"],
};

pub const GAME_LOG: LoaderTable = LoaderTable {
    category: "game",
    name: "log",
    key: &["GAME_ID", "TEAM_ID"],
};

pub const GAME_PBP: LoaderTable = LoaderTable {
    category: "game",
    name: "pbp",
    key: &["gameId", "actionNumber"],
};

/// One successful stats.nba.com download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchRecord {
    pub endpoint: String,
    pub params: String,
    pub row_count: u64,
    pub fetched_at: u64,
}

/// Average game length of one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationTrendRow {
    pub season_id: String,
    pub season_year: i64,
    /// Minutes
    pub avg_duration: f64,
    /// Trailing 3-season mean, empty for the first two seasons
    pub duration_ma3: Option<f64>,
}

/// Home vs away record of one team in one regular season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeAdvantageRow {
    pub season_id: String,
    pub season: i64,
    pub team: String,
    pub home_games: i64,
    pub home_wins: i64,
    pub home_win_rate: f64,
    pub away_games: i64,
    pub away_wins: i64,
    pub away_win_rate: f64,
    /// Home win rate minus away win rate, percentage points
    pub ha_diff: f64,
}

/// League-wide mean home advantage of one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeAdvantageTrendRow {
    pub season_id: String,
    pub ha_diff: f64,
    pub ha_diff_ma3: Option<f64>,
}

/// Shooting volume of one season, home and away combined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreePointTrendRow {
    pub season: i64,
    pub fgm: i64,
    pub fga: i64,
    pub fg3m: i64,
    pub fg3a: i64,
    /// Share of field goal attempts taken from three
    pub fg3a_pct: f64,
    /// Share of made field goals that were threes
    pub fg3m_pct: f64,
}

/// One play-by-play action from `game_pbp` (nba.com v3 format)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayByPlayEvent {
    pub game_id: String,
    pub action_number: i64,
    pub period: i64,
    pub clock: Option<String>,
    pub person_id: Option<PlayerId>,
    pub player_name: Option<String>,
    pub shot_distance: Option<f64>,
    pub shot_result: Option<String>,
    pub is_field_goal: Option<i64>,
    pub score_home: Option<i64>,
    pub score_away: Option<i64>,
    pub action_type: Option<String>,
    pub description: Option<String>,
    pub shot_value: Option<i64>,
}
