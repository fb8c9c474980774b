//! NBA statistics loader and analysis library
//!
//! Loads data from stats.nba.com into a local SQLite database next to the
//! public NBA dataset tables, and runs season and player analyses over it.
//!
//! ## Features
//!
//! - **Dataset Catalog**: The 16 tables of the NBA SQLite dataset
//! - **Loaders**: Player list, career totals, team game logs and play-by-play
//!   from stats.nba.com, cached on disk and stored incrementally
//! - **Season Analyses**: Game duration, home advantage and three-point trends
//! - **Situational Analyses**: Clutch and garbage-time shooting per player
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nba_stats::{
//!     analysis::{GameSituation, PlayerSelector, SituationalAnalyzer},
//!     storage::NbaDatabase,
//!     PlayerId,
//! };
//!
//! # fn example() -> nba_stats::Result<()> {
//! let db = NbaDatabase::open_existing(std::path::Path::new("data/raw/nba.sqlite"))?;
//! let analyzer = SituationalAnalyzer::load(&db)?;
//! if let Some(report) = analyzer.analyze_player(
//!     GameSituation::Clutch,
//!     &PlayerSelector::Id(PlayerId::new(201939)),
//! ) {
//!     println!("Clutch TS%: {:.3}", report.ts_pct);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export NBA_STATS_HOME=/srv/nba      # base data directory
//! export NBA_STATS_DB=/srv/nba.sqlite # database file override
//! ```

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod nba;
pub mod storage;

// Re-export commonly used types
pub use catalog::DatasetTable;
pub use cli::types::{GameId, PlayerId, Season, SeasonId, SeasonType, TeamId};
pub use error::{NbaError, Result};
