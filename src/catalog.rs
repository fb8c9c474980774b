//! Catalog of the sixteen tables shipped with the public NBA dataset
//! (CSV files plus a SQLite file built from `nba_api` data).
//!
//! The schemas belong to the dataset; this module only names and describes them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{NbaError, Result};

/// One table of the NBA dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetTable {
    CommonPlayerInfo,
    DraftCombineStats,
    DraftHistory,
    Game,
    GameInfo,
    GameSummary,
    InactivePlayers,
    LineScore,
    Officials,
    OtherStats,
    PlayByPlay,
    Player,
    Team,
    TeamDetails,
    TeamHistory,
    TeamInfoCommon,
}

impl DatasetTable {
    const ALL: [DatasetTable; 16] = [
        DatasetTable::CommonPlayerInfo,
        DatasetTable::DraftCombineStats,
        DatasetTable::DraftHistory,
        DatasetTable::Game,
        DatasetTable::GameInfo,
        DatasetTable::GameSummary,
        DatasetTable::InactivePlayers,
        DatasetTable::LineScore,
        DatasetTable::Officials,
        DatasetTable::OtherStats,
        DatasetTable::PlayByPlay,
        DatasetTable::Player,
        DatasetTable::Team,
        DatasetTable::TeamDetails,
        DatasetTable::TeamHistory,
        DatasetTable::TeamInfoCommon,
    ];

    pub fn all() -> &'static [DatasetTable] {
        &Self::ALL
    }

    /// Table name as it appears in the SQLite file and CSV file names.
    pub fn name(&self) -> &'static str {
        match self {
            DatasetTable::CommonPlayerInfo => "common_player_info",
            DatasetTable::DraftCombineStats => "draft_combine_stats",
            DatasetTable::DraftHistory => "draft_history",
            DatasetTable::Game => "game",
            DatasetTable::GameInfo => "game_info",
            DatasetTable::GameSummary => "game_summary",
            DatasetTable::InactivePlayers => "inactive_players",
            DatasetTable::LineScore => "line_score",
            DatasetTable::Officials => "officials",
            DatasetTable::OtherStats => "other_stats",
            DatasetTable::PlayByPlay => "play_by_play",
            DatasetTable::Player => "player",
            DatasetTable::Team => "team",
            DatasetTable::TeamDetails => "team_details",
            DatasetTable::TeamHistory => "team_history",
            DatasetTable::TeamInfoCommon => "team_info_common",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DatasetTable::CommonPlayerInfo => {
                "Biographical and career summary for every player (birthdate, school, country, draft, teams)"
            }
            DatasetTable::DraftCombineStats => {
                "Draft combine measurements and drill results (height, wingspan, vertical, agility)"
            }
            DatasetTable::DraftHistory => {
                "Every draft pick: season, round, overall pick, team and prior organization"
            }
            DatasetTable::Game => {
                "One row per game with home and away box score totals and the result"
            }
            DatasetTable::GameInfo => "Game date, attendance and game duration",
            DatasetTable::GameSummary => {
                "Game status, national broadcaster and live period information"
            }
            DatasetTable::InactivePlayers => "Players listed inactive for each game",
            DatasetTable::LineScore => "Points per quarter and overtime period for both teams",
            DatasetTable::Officials => "Referees assigned to each game",
            DatasetTable::OtherStats => {
                "Paint points, second-chance points, fast-break points, lead changes and times tied"
            }
            DatasetTable::PlayByPlay => "Every play-by-play event of each game",
            DatasetTable::Player => "Player ID, full name and active flag",
            DatasetTable::Team => "Team ID, abbreviation, nickname, city, state and year founded",
            DatasetTable::TeamDetails => {
                "Arena, capacity, ownership, management, head coach and social links"
            }
            DatasetTable::TeamHistory => "Franchise names and cities across seasons",
            DatasetTable::TeamInfoCommon => "Per-season team information, record and rankings",
        }
    }
}

impl fmt::Display for DatasetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetTable {
    type Err = NbaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|table| table.name() == wanted)
            .ok_or_else(|| NbaError::UnknownTable {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_sixteen_unique_tables() {
        let names: HashSet<_> = DatasetTable::all().iter().map(|t| t.name()).collect();
        assert_eq!(DatasetTable::all().len(), 16);
        assert_eq!(names.len(), 16);
    }

    #[test]
    fn test_every_table_has_description() {
        for table in DatasetTable::all() {
            assert!(!table.description().is_empty(), "{table} lacks a description");
        }
    }

    #[test]
    fn test_from_str_round_trip() {
        for table in DatasetTable::all() {
            assert_eq!(table.name().parse::<DatasetTable>().unwrap(), *table);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let table: DatasetTable = "Play_By_Play".parse().unwrap();
        assert_eq!(table, DatasetTable::PlayByPlay);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "box_score".parse::<DatasetTable>().unwrap_err();
        assert!(matches!(err, NbaError::UnknownTable { .. }));
    }

    #[test]
    fn test_serializes_as_table_name() {
        let json = serde_json::to_string(&DatasetTable::TeamInfoCommon).unwrap();
        assert_eq!(json, "\"team_info_common\"");
    }
}
