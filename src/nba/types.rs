//! Response shapes returned by stats.nba.com.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// A header + rows table, the unit every classic stats endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet", default)]
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Case-insensitive column lookup (`PLAYER_ID` matches `player_id`).
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
    }

    /// Values of one column; rows too short for the column yield `Null`.
    pub fn column_values<'a>(&'a self, column: &str) -> Option<impl Iterator<Item = &'a Value>> {
        let idx = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(move |row| row.get(idx).unwrap_or(&NULL)),
        )
    }
}

/// `resultSets` is a list on most endpoints and a single object on a few.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ResultSet>),
    One(ResultSet),
}

/// Top-level envelope of classic endpoints (`commonallplayers`, `playercareerstats`, ...).
#[derive(Debug, Deserialize)]
pub struct StatsEnvelope {
    #[serde(rename = "resultSets", default)]
    result_sets: Option<OneOrMany>,
    #[serde(rename = "resultSet", default)]
    result_set: Option<OneOrMany>,
}

impl StatsEnvelope {
    pub fn into_result_sets(self) -> Vec<ResultSet> {
        match self.result_sets.or(self.result_set) {
            Some(OneOrMany::Many(sets)) => sets,
            Some(OneOrMany::One(set)) => vec![set],
            None => Vec::new(),
        }
    }
}

/// Envelope of the `playbyplayv3` endpoint.
#[derive(Debug, Deserialize)]
pub struct PlayByPlayEnvelope {
    pub game: PlayByPlayGame,
}

#[derive(Debug, Deserialize)]
pub struct PlayByPlayGame {
    #[serde(rename = "gameId")]
    pub game_id: String,
    #[serde(default)]
    pub actions: Vec<Map<String, Value>>,
}

impl PlayByPlayGame {
    /// Flatten the action objects into a table with a leading `gameId` column.
    ///
    /// Columns are the union of the action keys in first-seen order.
    pub fn into_result_set(self) -> ResultSet {
        let mut headers = vec!["gameId".to_string()];
        for action in &self.actions {
            for key in action.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = self
            .actions
            .iter()
            .map(|action| {
                headers
                    .iter()
                    .map(|h| {
                        if h == "gameId" {
                            Value::String(self.game_id.clone())
                        } else {
                            action.get(h).cloned().unwrap_or(Value::Null)
                        }
                    })
                    .collect()
            })
            .collect();

        ResultSet::new("PlayByPlay", headers, rows)
    }
}
