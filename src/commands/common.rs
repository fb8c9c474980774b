//! Helpers shared across commands: database access and result output.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::{
    config::{ProjectPaths, SubTask},
    nba::CacheStatus,
    storage::NbaDatabase,
    Result,
};

/// Open the configured database for reading; it must already exist.
pub fn open_database(paths: &ProjectPaths) -> Result<NbaDatabase> {
    let path = paths.database_path();
    info!(path = %path.display(), "opening database");
    NbaDatabase::open_existing(&path)
}

/// Open the configured database for loading, creating it when missing.
pub fn open_or_create_database(paths: &ProjectPaths) -> Result<NbaDatabase> {
    let path = paths.database_path();
    info!(path = %path.display(), "opening database for writing");
    NbaDatabase::open(&path)
}

/// Write rows as CSV with a header line, creating parent directories.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "wrote CSV export");
    Ok(())
}

/// Export `rows` to `processed/<task>/<file_name>` and tell the user where it went.
pub fn save_export<T: Serialize>(
    paths: &ProjectPaths,
    task: SubTask,
    file_name: &str,
    rows: &[T],
) -> Result<PathBuf> {
    let path = paths.processed_task_dir(task).join(file_name);
    write_csv(&path, rows)?;
    println!("Saved to {}", path.display());
    Ok(path)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `12.3` with the given precision, `-` when absent
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}

/// Fraction as a percentage with one decimal: `0.4567` → `45.7%`
pub fn format_pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn cache_status_label(status: CacheStatus) -> &'static str {
    match status {
        CacheStatus::Hit => "from cache",
        CacheStatus::Miss => "downloaded",
        CacheStatus::Refreshed => "refreshed",
    }
}

/// File-name-safe form of a player label
pub fn file_slug(label: &str) -> String {
    let slug: String = label
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if slug.is_empty() {
        "player".to_string()
    } else {
        slug
    }
}
