//! `fetch` commands: download from stats.nba.com into the loader tables

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use super::common::{cache_status_label, open_or_create_database};
use crate::{
    cli::FetchCmd,
    config::ProjectPaths,
    nba::{CacheStatus, NbaClient},
    storage::{NbaDatabase, WriteMode, GAME_LOG, GAME_PBP, PLAYER_INFO, PLAYER_STATS},
    GameId, PlayerId, Result, Season,
};

/// Pause between consecutive per-player / per-game requests
pub const REQUEST_PAUSE: Duration = Duration::from_secs(1);

/// Outcome of a batch download
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchSummary {
    pub requested: usize,
    /// Already in the database
    pub skipped: usize,
    pub fetched: usize,
    pub failed: usize,
    pub rows: usize,
}

/// Replace `player_info` with the full player list
pub async fn fetch_players(
    db: &mut NbaDatabase,
    client: &NbaClient,
    season: Season,
) -> Result<usize> {
    let (set, status) = client.common_all_players(season).await?;
    info!(rows = set.len(), source = cache_status_label(status), "player list received");

    let rows = db.save_result_set(&PLAYER_INFO, &set, WriteMode::Replace)?;
    db.record_fetch("commonallplayers", &format!("Season={season}"), rows)?;
    Ok(rows)
}

/// Append career totals to `player_stats` for players not stored yet.
///
/// One failing player is logged and counted; the batch continues.
pub async fn fetch_careers(
    db: &mut NbaDatabase,
    client: &NbaClient,
    player_ids: &[PlayerId],
    pause: Duration,
) -> Result<FetchSummary> {
    let existing = db.existing_ids(&PLAYER_STATS.table_name(), "PLAYER_ID")?;
    let mut seen = HashSet::new();
    let new_ids: Vec<PlayerId> = player_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .filter(|id| !existing.contains(&id.to_string()))
        .collect();

    let mut summary = FetchSummary {
        requested: seen.len(),
        skipped: seen.len() - new_ids.len(),
        ..Default::default()
    };

    if new_ids.is_empty() {
        println!("All requested players are already stored, nothing to download.");
        return Ok(summary);
    }

    let mut last_status = None;
    for player_id in new_ids {
        if matches!(last_status, Some(CacheStatus::Miss | CacheStatus::Refreshed)) {
            tokio::time::sleep(pause).await;
        }

        info!(%player_id, "fetching career stats");
        let result = match client.player_career_stats(player_id).await {
            Ok((set, status)) => {
                last_status = Some(status);
                db.save_result_set(&PLAYER_STATS, &set, WriteMode::Append)
                    .and_then(|rows| {
                        let params = format!("PlayerID={player_id}");
                        db.record_fetch("playercareerstats", &params, rows)?;
                        Ok(rows)
                    })
            }
            Err(e) => {
                last_status = Some(CacheStatus::Miss);
                Err(e)
            }
        };

        match result {
            Ok(rows) => {
                summary.fetched += 1;
                summary.rows += rows;
            }
            Err(e) => {
                error!(%player_id, error = %e, "failed to fetch career stats");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Append one season of team game logs to `game_log`
pub async fn fetch_games(
    db: &mut NbaDatabase,
    client: &NbaClient,
    season: Season,
) -> Result<usize> {
    let (set, status) = client.league_game_finder(season).await?;
    info!(%season, rows = set.len(), source = cache_status_label(status), "game logs received");

    let rows = db.save_result_set(&GAME_LOG, &set, WriteMode::Append)?;
    db.record_fetch("leaguegamefinder", &format!("Season={season}"), rows)?;
    Ok(rows)
}

/// Append play-by-play actions to `game_pbp` for games not stored yet.
///
/// Failures are handled per game, like [`fetch_careers`].
pub async fn fetch_play_by_play(
    db: &mut NbaDatabase,
    client: &NbaClient,
    game_ids: &[GameId],
    pause: Duration,
) -> Result<FetchSummary> {
    let existing = db.existing_ids(&GAME_PBP.table_name(), "gameId")?;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut new_ids: Vec<&GameId> = Vec::new();
    for game_id in game_ids {
        if seen.insert(game_id.as_str()) && !existing.contains(game_id.as_str()) {
            new_ids.push(game_id);
        }
    }

    let mut summary = FetchSummary {
        requested: seen.len(),
        skipped: seen.len() - new_ids.len(),
        ..Default::default()
    };

    if new_ids.is_empty() {
        println!("All requested games are already stored, nothing to download.");
        return Ok(summary);
    }

    let mut last_status = None;
    for game_id in new_ids {
        if matches!(last_status, Some(CacheStatus::Miss | CacheStatus::Refreshed)) {
            tokio::time::sleep(pause).await;
        }

        info!(%game_id, "fetching play-by-play");
        let result = match client.play_by_play(game_id).await {
            Ok((set, status)) => {
                last_status = Some(status);
                if set.is_empty() {
                    warn!(%game_id, "no play-by-play actions returned");
                }
                db.save_result_set(&GAME_PBP, &set, WriteMode::Append)
                    .and_then(|rows| {
                        db.record_fetch("playbyplayv3", &format!("GameID={game_id}"), rows)?;
                        Ok(rows)
                    })
            }
            Err(e) => {
                last_status = Some(CacheStatus::Miss);
                Err(e)
            }
        };

        match result {
            Ok(rows) => {
                summary.fetched += 1;
                summary.rows += rows;
            }
            Err(e) => {
                error!(%game_id, error = %e, "failed to fetch play-by-play");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn print_summary(what: &str, summary: &FetchSummary) {
    println!(
        "✓ {what}: {} fetched ({} rows), {} already stored, {} failed",
        summary.fetched, summary.rows, summary.skipped, summary.failed
    );
}

/// Handle the fetch commands
pub async fn handle_fetch(paths: &ProjectPaths, cmd: FetchCmd) -> Result<()> {
    paths.init_project_structure()?;
    let mut db = open_or_create_database(paths)?;
    let client = |refresh: bool| -> Result<NbaClient> {
        Ok(NbaClient::with_cache_dir(paths.cache_dir())?.with_refresh(refresh))
    };

    match cmd {
        FetchCmd::Players { refresh } => {
            println!("Fetching the league player list...");
            let rows = fetch_players(&mut db, &client(refresh)?, Season::default()).await?;
            println!("✓ Stored {rows} players in player_info");
        }
        FetchCmd::Careers {
            player_ids,
            refresh,
        } => {
            let summary =
                fetch_careers(&mut db, &client(refresh)?, &player_ids, REQUEST_PAUSE).await?;
            print_summary("Career stats", &summary);
        }
        FetchCmd::Games { season, refresh } => {
            println!("Fetching {season} game logs...");
            let rows = fetch_games(&mut db, &client(refresh)?, season).await?;
            println!("✓ Stored {rows} team game rows in game_log");
        }
        FetchCmd::PlayByPlay { game_ids, refresh } => {
            let summary =
                fetch_play_by_play(&mut db, &client(refresh)?, &game_ids, REQUEST_PAUSE).await?;
            print_summary("Play-by-play", &summary);
        }
    }

    Ok(())
}
