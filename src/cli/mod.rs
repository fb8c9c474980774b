//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use types::{GameId, PlayerId, Season};

use crate::analysis::GameSituation;

/// Arguments shared by the SQL-backed season analyses
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output results as JSON instead of a text table.
    #[clap(long)]
    pub json: bool,

    /// Do not write the CSV export under `processed/<task>/`.
    #[clap(long)]
    pub no_save: bool,
}

/// Player to analyze: exactly one of id or name.
#[derive(Debug, Args)]
#[clap(group(ArgGroup::new("player").required(true).args(["player_id", "player_name"])))]
pub struct PlayerArgs {
    /// NBA person id (e.g. 2544).
    #[clap(long)]
    pub player_id: Option<PlayerId>,

    /// Player name exactly as written in the play-by-play (e.g. `James`).
    #[clap(long)]
    pub player_name: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum FetchCmd {
    /// Download the full player list (`commonallplayers`) into `player_info`.
    Players {
        /// Force refresh from stats.nba.com, overwriting the cache.
        #[clap(long)]
        refresh: bool,
    },

    /// Download career season totals into `player_stats`.
    ///
    /// Players already present are skipped; requests are spaced one second apart.
    Careers {
        /// Player ids (repeatable): `-p 2544 -p 201939`.
        #[clap(short = 'p', long = "player-id", required = true)]
        player_ids: Vec<PlayerId>,

        /// Force refresh from stats.nba.com, overwriting the cache.
        #[clap(long)]
        refresh: bool,
    },

    /// Download one season of team game logs (`leaguegamefinder`) into `game_log`.
    Games {
        /// Season (e.g. 2023-24).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Force refresh from stats.nba.com, overwriting the cache.
        #[clap(long)]
        refresh: bool,
    },

    /// Download play-by-play actions (`playbyplayv3`) into `game_pbp`.
    PlayByPlay {
        /// Game ids (repeatable): `-g 0022300061`.
        #[clap(short = 'g', long = "game-id", required = true)]
        game_ids: Vec<GameId>,

        /// Force refresh from stats.nba.com, overwriting the cache.
        #[clap(long)]
        refresh: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AnalyzeCmd {
    /// Average regular-season game length per season.
    Duration {
        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Home vs away win rates per team and season.
    HomeAdvantage {
        /// Show the league-wide mean per season instead of per-team rows.
        #[clap(long)]
        trend: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// League three-point attempt and make shares per season.
    ThreePoint {
        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Shooting in the last five minutes with a margin of 5 or less.
    Clutch {
        #[clap(flatten)]
        player: PlayerArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Shooting in the last five minutes with a margin above 15.
    GarbageTime {
        #[clap(flatten)]
        player: PlayerArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Compare several players in one situation, best true shooting first.
    Compare {
        /// Game situation to compare in.
        #[clap(long, value_enum)]
        situation: GameSituation,

        /// Player ids (repeatable): `-p 2544 -p 201939`.
        #[clap(short = 'p', long = "player-id", required = true)]
        player_ids: Vec<PlayerId>,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "nba-stats", about = "NBA statistics loader and analysis CLI")]
pub struct Nba {
    /// Base data directory (or set `NBA_STATS_HOME`).
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// SQLite database file (or set `NBA_STATS_DB`); defaults to `<data-dir>/raw/nba.sqlite`.
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log progress to the console (INFO instead of WARN).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the data directory layout.
    Init,

    /// List the dataset tables.
    Tables {
        /// Also report whether each table exists in the database and its row count.
        #[clap(long)]
        check: bool,
    },

    /// List the seasons covered by the loaders.
    Seasons,

    /// Download data from stats.nba.com into the database
    Fetch {
        #[clap(subcommand)]
        cmd: FetchCmd,
    },

    /// Run analyses over the database
    Analyze {
        #[clap(subcommand)]
        cmd: AnalyzeCmd,
    },
}
