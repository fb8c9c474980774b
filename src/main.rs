//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use nba_stats::{
    cli::{Commands, Nba},
    commands::{
        analyze::handle_analyze,
        fetch::handle_fetch,
        init::{handle_init, handle_seasons},
        tables::handle_tables,
    },
    config::ProjectPaths,
    logging::init_logging,
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = Nba::parse();
    let paths = ProjectPaths::resolve(app.data_dir, app.db);

    if let Err(e) = init_logging(&paths.logs_dir(), app.verbose) {
        eprintln!("Warning: file logging disabled ({e})");
    }

    match app.command {
        Commands::Init => handle_init(&paths)?,
        Commands::Tables { check } => handle_tables(&paths, check)?,
        Commands::Seasons => handle_seasons()?,
        Commands::Fetch { cmd } => handle_fetch(&paths, cmd).await?,
        Commands::Analyze { cmd } => handle_analyze(&paths, cmd)?,
    }

    Ok(())
}
