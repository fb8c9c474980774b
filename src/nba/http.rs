//! stats.nba.com client for the endpoints the loader needs.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    core::{stats_header_map, ResponseCacheKey, UnifiedCache},
    error::NbaError,
    nba::types::{PlayByPlayEnvelope, ResultSet, StatsEnvelope},
    GameId, PlayerId, Result, Season,
};


/// Base path for the stats.nba.com JSON API.
pub const STATS_BASE_URL: &str = "https://stats.nba.com/stats";

/// NBA league code used by every endpoint.
pub const NBA_LEAGUE_ID: &str = "00";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MEMORY_CACHE_ENTRIES: usize = 64;

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the memory or disk cache
    Hit,
    /// Not cached yet, fetched from stats.nba.com
    Miss,
    /// Cache bypassed on request and overwritten
    Refreshed,
}

/// Client for stats.nba.com with a two-tier response cache.
pub struct NbaClient {
    client: Client,
    base_url: String,
    cache: UnifiedCache<ResponseCacheKey, Value>,
    refresh: bool,
}

impl NbaClient {
    /// Client with a memory-only cache.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .default_headers(stats_header_map()?)
                .timeout(REQUEST_TIMEOUT)
                .build()?,
            base_url: STATS_BASE_URL.to_string(),
            cache: UnifiedCache::new(MEMORY_CACHE_ENTRIES),
            refresh: false,
        })
    }

    /// Client whose responses are also persisted as JSON under `cache_dir`.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir).map_err(|e| NbaError::Cache {
            message: format!("cannot create {}: {e}", cache_dir.display()),
        })?;

        let mut client = Self::new()?;
        client.cache = UnifiedCache::with_disk(MEMORY_CACHE_ENTRIES, cache_dir);
        Ok(client)
    }

    /// Point the client at another host (used by tests with a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Ignore cached responses and overwrite them with fresh ones.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<(Value, CacheStatus)> {
        let key = ResponseCacheKey::new(endpoint, params);

        if !self.refresh {
            if let Some(cached) = self.cache.get(&key) {
                debug!(endpoint, "stats.nba.com response served from cache");
                return Ok((cached, CacheStatus::Hit));
            }
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        info!(endpoint, ?params, "requesting stats.nba.com");

        let value = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        if value.is_null() {
            return Err(NbaError::EmptyResponse {
                endpoint: endpoint.to_string(),
            });
        }

        self.cache.put(key, value.clone());
        let status = if self.refresh {
            CacheStatus::Refreshed
        } else {
            CacheStatus::Miss
        };
        Ok((value, status))
    }

    async fn first_result_set(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<(ResultSet, CacheStatus)> {
        let (value, status) = self.get_json(endpoint, params).await?;
        let parsed = serde_json::from_value::<StatsEnvelope>(value)
            .map_err(NbaError::from)
            .and_then(|envelope| {
                envelope
                    .into_result_sets()
                    .into_iter()
                    .next()
                    .ok_or_else(|| NbaError::MissingResultSet {
                        endpoint: endpoint.to_string(),
                    })
            });

        match parsed {
            Ok(set) => Ok((set, status)),
            Err(e) => {
                self.discard_cached(endpoint, params);
                Err(e)
            }
        }
    }

    /// Drop a response that turned out to be unusable so the next run refetches it.
    fn discard_cached(&self, endpoint: &str, params: &[(&str, String)]) {
        if let Err(e) = self.cache.invalidate(&ResponseCacheKey::new(endpoint, params)) {
            warn!(endpoint, error = %e, "could not remove cached response");
        }
    }

    /// Every player in league history (`commonallplayers`, `IsOnlyCurrentSeason=0`).
    pub async fn common_all_players(&self, season: Season) -> Result<(ResultSet, CacheStatus)> {
        self.first_result_set(
            "commonallplayers",
            &[
                ("IsOnlyCurrentSeason", "0".to_string()),
                ("LeagueID", NBA_LEAGUE_ID.to_string()),
                ("Season", season.to_string()),
            ],
        )
        .await
    }

    /// Regular season totals per season for one player (`playercareerstats`).
    pub async fn player_career_stats(
        &self,
        player_id: PlayerId,
    ) -> Result<(ResultSet, CacheStatus)> {
        self.first_result_set(
            "playercareerstats",
            &[
                ("LeagueID", NBA_LEAGUE_ID.to_string()),
                ("PerMode", "Totals".to_string()),
                ("PlayerID", player_id.to_string()),
            ],
        )
        .await
    }

    /// Team game logs of one season, one row per team per game (`leaguegamefinder`).
    pub async fn league_game_finder(&self, season: Season) -> Result<(ResultSet, CacheStatus)> {
        self.first_result_set(
            "leaguegamefinder",
            &[
                ("LeagueID", NBA_LEAGUE_ID.to_string()),
                ("PlayerOrTeam", "T".to_string()),
                ("Season", season.to_string()),
            ],
        )
        .await
    }

    /// All play-by-play actions of one game (`playbyplayv3`).
    pub async fn play_by_play(&self, game_id: &GameId) -> Result<(ResultSet, CacheStatus)> {
        let params = [
            ("EndPeriod", "0".to_string()),
            ("GameID", game_id.to_string()),
            ("StartPeriod", "0".to_string()),
        ];
        let (value, status) = self.get_json("playbyplayv3", &params).await?;

        match serde_json::from_value::<PlayByPlayEnvelope>(value) {
            Ok(envelope) => Ok((envelope.game.into_result_set(), status)),
            Err(e) => {
                self.discard_cached("playbyplayv3", &params);
                Err(e.into())
            }
        }
    }
}
