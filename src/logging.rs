//! Tracing setup: console at WARN (INFO with `--verbose`, or `RUST_LOG`),
//! a full log file at INFO and an error-only log file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::Result;

pub const LOG_NAME: &str = "nba_stats";

/// Paths of the full log and the error-only log inside `logs_dir`.
pub fn log_file_paths(logs_dir: &Path) -> (PathBuf, PathBuf) {
    (
        logs_dir.join(format!("{LOG_NAME}.log")),
        logs_dir.join(format!("{LOG_NAME}_error.log")),
    )
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(logs_dir: &Path, verbose: bool) -> Result<()> {
    std::fs::create_dir_all(logs_dir)?;
    let (full_path, error_path) = log_file_paths(logs_dir);

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_filter);
    let full_log = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(open_append(&full_path)?))
        .with_filter(LevelFilter::INFO);
    let error_log = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(open_append(&error_path)?))
        .with_filter(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(console)
        .with(full_log)
        .with(error_log)
        .try_init()
        .map_err(anyhow::Error::from)?;

    Ok(())
}
