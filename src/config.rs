//! Project paths, season range and analysis sub-tasks.
//!
//! Everything lives under one base directory:
//!
//! ```text
//! <base>/raw/nba.sqlite      dataset / loader database
//! <base>/processed/<task>/   CSV outputs of each analysis
//! <base>/reports/<task>/     exported report series
//! <base>/logs/               nba_stats.log, nba_stats_error.log
//! <base>/cache/              cached stats.nba.com responses
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Result, Season};

/// Overrides the base data directory.
pub const HOME_ENV_VAR: &str = "NBA_STATS_HOME";

/// Overrides the SQLite database path.
pub const DB_ENV_VAR: &str = "NBA_STATS_DB";

/// First and last season start years covered by the dataset.
pub const START_YEAR: u16 = 1985;
pub const END_YEAR: u16 = 2024;

pub const DATABASE_FILE: &str = "nba.sqlite";

/// Analysis sub-tasks; each owns a `processed/` and a `reports/` subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubTask {
    Duration,
    HomeAdvantage,
    PlayerStats,
    Clutch,
    GarbageTime,
    ThreePoint,
}

impl SubTask {
    pub const ALL: [SubTask; 6] = [
        SubTask::Duration,
        SubTask::HomeAdvantage,
        SubTask::PlayerStats,
        SubTask::Clutch,
        SubTask::GarbageTime,
        SubTask::ThreePoint,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            SubTask::Duration => "duration",
            SubTask::HomeAdvantage => "home_advantage",
            SubTask::PlayerStats => "player_stats",
            SubTask::Clutch => "clutch",
            SubTask::GarbageTime => "garbage_time",
            SubTask::ThreePoint => "three_point",
        }
    }
}

impl fmt::Display for SubTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// All seasons from 1985-86 through 2024-25.
pub fn seasons() -> Vec<Season> {
    (START_YEAR..=END_YEAR).map(Season::new).collect()
}

/// Default base directory: `<data dir>/nba-stats`, e.g. `~/.local/share/nba-stats`.
pub fn default_base_dir() -> PathBuf {
    base_dir_under(dirs::data_dir())
}

/// `./.nba-stats` when the platform has no data directory
fn base_dir_under(data_dir: Option<PathBuf>) -> PathBuf {
    match data_dir {
        Some(dir) => dir.join("nba-stats"),
        None => PathBuf::from(".nba-stats"),
    }
}

/// Resolved filesystem layout for one run of the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    base: PathBuf,
    database: Option<PathBuf>,
}

impl ProjectPaths {
    /// Layout rooted at `base`, database at `<base>/raw/nba.sqlite`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            database: None,
        }
    }

    /// Resolve from CLI flags first, then environment variables, then defaults.
    pub fn resolve(data_dir: Option<PathBuf>, db: Option<PathBuf>) -> Self {
        let base = data_dir
            .or_else(|| std::env::var_os(HOME_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(default_base_dir);
        let database = db.or_else(|| std::env::var_os(DB_ENV_VAR).map(PathBuf::from));

        Self { base, database }
    }

    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.base.join("raw")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.base.join("processed")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.base.join("reports")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.base.join("cache")
    }

    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| self.raw_dir().join(DATABASE_FILE))
    }

    pub fn processed_task_dir(&self, task: SubTask) -> PathBuf {
        self.processed_dir().join(task.dir_name())
    }

    pub fn reports_task_dir(&self, task: SubTask) -> PathBuf {
        self.reports_dir().join(task.dir_name())
    }

    /// Every directory the project needs, in creation order.
    pub fn required_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![
            self.raw_dir(),
            self.processed_dir(),
            self.reports_dir(),
            self.logs_dir(),
            self.cache_dir(),
        ];
        for task in SubTask::ALL {
            dirs.push(self.processed_task_dir(task));
            dirs.push(self.reports_task_dir(task));
        }
        dirs
    }

    /// Create the directory layout. Safe to call repeatedly.
    pub fn init_project_structure(&self) -> Result<()> {
        for dir in self.required_dirs() {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}
