//! `init` and `seasons` commands

use crate::{config, config::ProjectPaths, Result};

/// Create the data directory layout
pub fn handle_init(paths: &ProjectPaths) -> Result<()> {
    paths.init_project_structure()?;

    println!("✓ Project structure ready under {}", paths.base().display());
    println!("Database path: {}", paths.database_path().display());
    Ok(())
}

/// Print the seasons the loaders cover, one per line
pub fn handle_seasons() -> Result<()> {
    for season in config::seasons() {
        println!("{season}");
    }
    Ok(())
}
