//! Player shooting efficiency in late-game situations.
//!
//! Both situations look at the last five minutes of the fourth quarter and
//! overtime and differ only in the score margin:
//!
//! - **clutch**: margin of 5 points or fewer
//! - **garbage time**: margin above 15 points
//!
//! Actions without a score on either side have no margin and never qualify.

use std::collections::HashSet;
use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::clock::seconds_remaining;
use crate::{
    core::{CacheKey, UnifiedCache},
    storage::{NbaDatabase, PlayByPlayEvent},
    PlayerId, Result,
};

#[cfg(test)]
mod tests;

/// Last five minutes of a period
pub const LATE_GAME_SECONDS: f64 = 300.0;
pub const CLUTCH_MAX_MARGIN: i64 = 5;
pub const GARBAGE_TIME_MIN_MARGIN: i64 = 15;
/// Free throws are weighted by 0.44 possessions in true shooting
pub const FREE_THROW_POSSESSION_WEIGHT: f64 = 0.44;

const REPORT_CACHE_ENTRIES: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GameSituation {
    Clutch,
    GarbageTime,
}

impl GameSituation {
    /// Whether an action at this clock and margin belongs to the situation.
    pub fn includes(&self, period: i64, seconds_left: f64, margin: i64) -> bool {
        if period < 4 || seconds_left > LATE_GAME_SECONDS {
            return false;
        }
        match self {
            GameSituation::Clutch => margin <= CLUTCH_MAX_MARGIN,
            GameSituation::GarbageTime => margin > GARBAGE_TIME_MIN_MARGIN,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameSituation::Clutch => "clutch",
            GameSituation::GarbageTime => "garbage-time",
        }
    }
}

impl fmt::Display for GameSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which player to report on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSelector {
    Id(PlayerId),
    /// Exact `playerName` as written in the play-by-play (usually the family name)
    Name(String),
}

impl PlayerSelector {
    fn matches(&self, event: &PlayByPlayEvent) -> bool {
        match self {
            PlayerSelector::Id(id) => event.person_id == Some(*id),
            PlayerSelector::Name(name) => event.player_name.as_deref() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for PlayerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSelector::Id(id) => write!(f, "{id}"),
            PlayerSelector::Name(name) => f.write_str(name),
        }
    }
}

/// Attempts and makes inside one shot distance range (feet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceBucket {
    pub label: String,
    pub attempts: u32,
    pub made: u32,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotDistanceProfile {
    /// Mean distance of field goal attempts with a recorded distance
    pub avg_distance: Option<f64>,
    pub buckets: Vec<DistanceBucket>,
}

const DISTANCE_BUCKETS: [(&str, f64, f64); 3] = [
    ("0-9 ft", 0.0, 10.0),
    ("10-23 ft", 10.0, 24.0),
    ("24+ ft", 24.0, f64::INFINITY),
];

/// Shooting summary of one player in one situation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SituationalReport {
    pub player: String,
    pub player_id: Option<PlayerId>,
    pub situation: GameSituation,
    pub game_count: usize,
    pub points: u32,
    pub fga: u32,
    pub fgm: u32,
    pub fg3a: u32,
    pub fg3m: u32,
    pub fta: u32,
    pub ftm: u32,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
    pub ts_pct: f64,
    /// Share of field goal attempts taken from three
    pub fg3_rate: f64,
    pub shot_distance: ShotDistanceProfile,
}

/// Flat form of [`SituationalReport`] for CSV export
#[derive(Debug, Clone, Serialize)]
pub struct SituationalReportRow {
    pub player: String,
    pub player_id: Option<u64>,
    pub situation: GameSituation,
    pub game_count: usize,
    pub points: u32,
    pub fga: u32,
    pub fgm: u32,
    pub fg3a: u32,
    pub fg3m: u32,
    pub fta: u32,
    pub ftm: u32,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
    pub ts_pct: f64,
    pub fg3_rate: f64,
    pub avg_shot_distance: Option<f64>,
}

impl From<&SituationalReport> for SituationalReportRow {
    fn from(r: &SituationalReport) -> Self {
        Self {
            player: r.player.clone(),
            player_id: r.player_id.map(|id| id.as_u64()),
            situation: r.situation,
            game_count: r.game_count,
            points: r.points,
            fga: r.fga,
            fgm: r.fgm,
            fg3a: r.fg3a,
            fg3m: r.fg3m,
            fta: r.fta,
            ftm: r.ftm,
            fg_pct: r.fg_pct,
            fg3_pct: r.fg3_pct,
            ft_pct: r.ft_pct,
            ts_pct: r.ts_pct,
            fg3_rate: r.fg3_rate,
            avg_shot_distance: r.shot_distance.avg_distance,
        }
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_ascii_lowercase().contains(&needle.to_ascii_lowercase()))
        .unwrap_or(false)
}

fn is_field_goal_attempt(event: &PlayByPlayEvent) -> bool {
    event.is_field_goal == Some(1)
}

fn is_made_shot(event: &PlayByPlayEvent) -> bool {
    event.shot_result.as_deref().map(str::trim) == Some("Made")
}

fn is_free_throw(event: &PlayByPlayEvent) -> bool {
    contains_ignore_case(event.action_type.as_deref(), "free throw")
}

/// A free throw counts as made unless its description mentions a miss.
fn is_made_free_throw(event: &PlayByPlayEvent) -> bool {
    !contains_ignore_case(event.description.as_deref(), "MISS")
}

/// Compute the report for the events of one player in one situation.
///
/// `None` when there are no events.
pub fn summarize(
    events: &[&PlayByPlayEvent],
    situation: GameSituation,
    selector: &PlayerSelector,
) -> Option<SituationalReport> {
    let first = events.first()?;

    let field_goals: Vec<&PlayByPlayEvent> = events
        .iter()
        .copied()
        .filter(|e| is_field_goal_attempt(e))
        .collect();
    let threes: Vec<&PlayByPlayEvent> = field_goals
        .iter()
        .copied()
        .filter(|e| e.shot_value == Some(3))
        .collect();
    let free_throws: Vec<&PlayByPlayEvent> = events
        .iter()
        .copied()
        .filter(|e| is_free_throw(e))
        .collect();

    let fga = field_goals.len() as u32;
    let fgm = field_goals.iter().filter(|e| is_made_shot(e)).count() as u32;
    let fg3a = threes.len() as u32;
    let fg3m = threes.iter().filter(|e| is_made_shot(e)).count() as u32;
    let fta = free_throws.len() as u32;
    let ftm = free_throws.iter().filter(|e| is_made_free_throw(e)).count() as u32;

    let points = (fgm - fg3m) * 2 + fg3m * 3 + ftm;
    let ts_pct = if fga + fta > 0 {
        f64::from(points) / (2.0 * (f64::from(fga) + FREE_THROW_POSSESSION_WEIGHT * f64::from(fta)))
    } else {
        0.0
    };

    let game_count = events
        .iter()
        .map(|e| e.game_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let player = match selector {
        PlayerSelector::Name(name) => name.clone(),
        PlayerSelector::Id(id) => first
            .player_name
            .clone()
            .unwrap_or_else(|| id.to_string()),
    };
    let player_id = match selector {
        PlayerSelector::Id(id) => Some(*id),
        PlayerSelector::Name(_) => first.person_id,
    };

    Some(SituationalReport {
        player,
        player_id,
        situation,
        game_count,
        points,
        fga,
        fgm,
        fg3a,
        fg3m,
        fta,
        ftm,
        fg_pct: ratio(fgm, fga),
        fg3_pct: ratio(fg3m, fg3a),
        ft_pct: ratio(ftm, fta),
        ts_pct,
        fg3_rate: ratio(fg3a, fga),
        shot_distance: shot_distance_profile(&field_goals),
    })
}

fn shot_distance_profile(field_goals: &[&PlayByPlayEvent]) -> ShotDistanceProfile {
    let distances: Vec<f64> = field_goals.iter().filter_map(|e| e.shot_distance).collect();
    let avg_distance = if distances.is_empty() {
        None
    } else {
        Some(distances.iter().sum::<f64>() / distances.len() as f64)
    };

    let buckets = DISTANCE_BUCKETS
        .iter()
        .map(|(label, low, high)| {
            let in_range: Vec<&&PlayByPlayEvent> = field_goals
                .iter()
                .filter(|e| matches!(e.shot_distance, Some(d) if d >= *low && d < *high))
                .collect();
            let attempts = in_range.len() as u32;
            let made = in_range.iter().filter(|e| is_made_shot(e)).count() as u32;
            DistanceBucket {
                label: label.to_string(),
                attempts,
                made,
                pct: ratio(made, attempts),
            }
        })
        .collect();

    ShotDistanceProfile {
        avg_distance,
        buckets,
    }
}

/// Cache key for computed reports
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ReportCacheKey {
    situation: GameSituation,
    selector: PlayerSelector,
}

impl CacheKey for ReportCacheKey {
    fn to_file_key(&self) -> String {
        format!("report_{}_{}", self.situation.label(), self.selector)
    }
}

/// Late-game event pool with per-player report caching.
///
/// Events are loaded once; each (situation, player) report is computed on
/// first request and served from an in-memory LRU afterwards.
pub struct SituationalAnalyzer {
    events: Vec<PlayByPlayEvent>,
    reports: UnifiedCache<ReportCacheKey, Option<SituationalReport>>,
}

impl SituationalAnalyzer {
    pub fn load(db: &NbaDatabase) -> Result<Self> {
        Ok(Self::from_events(db.late_game_events()?))
    }

    pub fn from_events(events: Vec<PlayByPlayEvent>) -> Self {
        debug!(events = events.len(), "late-game events loaded");
        Self {
            events,
            reports: UnifiedCache::new(REPORT_CACHE_ENTRIES),
        }
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Events of `selector` that fall inside `situation`, in game order
    pub fn situational_events(
        &self,
        situation: GameSituation,
        selector: &PlayerSelector,
    ) -> Vec<&PlayByPlayEvent> {
        self.events
            .par_iter()
            .filter(|e| selector.matches(e))
            .filter(|e| {
                let (Some(home), Some(away)) = (e.score_home, e.score_away) else {
                    return false;
                };
                let seconds_left = seconds_remaining(e.clock.as_deref());
                situation.includes(e.period, seconds_left, (home - away).abs())
            })
            .collect()
    }

    /// Report for one player, or `None` (with a warning) when the player has
    /// no actions in the situation.
    pub fn analyze_player(
        &self,
        situation: GameSituation,
        selector: &PlayerSelector,
    ) -> Option<SituationalReport> {
        let key = ReportCacheKey {
            situation,
            selector: selector.clone(),
        };
        if let Some(cached) = self.reports.get(&key) {
            return cached;
        }

        let events = self.situational_events(situation, selector);
        let report = summarize(&events, situation, selector);
        if report.is_none() {
            warn!(player = %selector, %situation, "no play-by-play data found");
        }

        self.reports.put(key, report.clone());
        report
    }

    /// Reports for several players, best true shooting first.
    ///
    /// Players without data are left out; repeated ids are reported once.
    pub fn compare_players(
        &self,
        situation: GameSituation,
        player_ids: &[PlayerId],
    ) -> Vec<SituationalReport> {
        let mut seen = HashSet::new();
        let unique_ids: Vec<PlayerId> = player_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let mut reports: Vec<SituationalReport> = unique_ids
            .par_iter()
            .filter_map(|id| self.analyze_player(situation, &PlayerSelector::Id(*id)))
            .collect();

        reports.sort_by(|a, b| {
            b.ts_pct
                .partial_cmp(&a.ts_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        reports
    }
}
