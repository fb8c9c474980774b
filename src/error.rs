//! Error types for the NBA stats CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, NbaError>;

#[derive(Error, Debug)]
pub enum NbaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Other(#[from] anyhow::Error),

    #[error("Invalid season: {value} (expected e.g. 2023-24)")]
    InvalidSeason { value: String },

    #[error("Invalid player ID: {value}")]
    InvalidPlayerId { value: String },

    #[error("Invalid game ID: {value} (expected digits, e.g. 0022300061)")]
    InvalidGameId { value: String },

    #[error("Unknown dataset table: {name}")]
    UnknownTable { name: String },

    #[error("Invalid SQL identifier: {name}")]
    InvalidIdentifier { name: String },

    #[error("Response from {endpoint} has no result set")]
    MissingResultSet { endpoint: String },

    #[error("stats.nba.com returned no data for {endpoint}")]
    EmptyResponse { endpoint: String },

    #[error("Database not found at {path} (download the dataset or run `nba-stats fetch`)")]
    MissingDatabase { path: String },

    #[error("Cache error: {message}")]
    Cache { message: String },
}
