//! Season-level analyses over the dataset `game` / `game_info` tables and
//! the late-game slice of the `game_pbp` play-by-play table

use rusqlite::types::Value as SqlValue;
use tracing::warn;

use super::{
    models::*,
    schema::NbaDatabase,
    values::{sql_to_f64, sql_to_i64, sql_to_text},
};
use crate::{analysis::trends::rolling_mean, PlayerId, Result};

/// Window of the moving averages shown next to season series
pub const TREND_WINDOW: usize = 3;

impl NbaDatabase {
    /// Average regular-season game length per season, in minutes.
    ///
    /// `game_info.game_time` is `H:MM`; games without a colon are skipped.
    pub fn game_duration_trend(&self) -> Result<Vec<DurationTrendRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                 CAST(g.season_id AS TEXT) AS season_id,
                 CAST(SUBSTR(g.season_id, 2) AS INTEGER) AS season_year,
                 AVG(CAST(SUBSTR(gi.game_time, 1, INSTR(gi.game_time, ':') - 1) AS INTEGER) * 60 +
                     CAST(SUBSTR(gi.game_time, INSTR(gi.game_time, ':') + 1) AS INTEGER)) AS avg_duration
             FROM game g
             JOIN game_info gi ON g.game_id = gi.game_id
             WHERE g.season_id LIKE '2%'
               AND gi.game_time LIKE '%:%'
             GROUP BY g.season_id
             ORDER BY g.season_id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut seasons = Vec::new();
        for row in rows {
            seasons.push(row?);
        }

        let durations: Vec<f64> = seasons.iter().map(|(_, _, avg)| *avg).collect();
        let moving = rolling_mean(&durations, TREND_WINDOW);

        Ok(seasons
            .into_iter()
            .zip(moving)
            .map(
                |((season_id, season_year, avg_duration), duration_ma3)| DurationTrendRow {
                    season_id,
                    season_year,
                    avg_duration,
                    duration_ma3,
                },
            )
            .collect())
    }

    /// Home and away win rates per team and regular season.
    ///
    /// Teams with fewer than 10 home games in a season are left out.
    /// Sorted by season (newest first), then by home advantage.
    pub fn home_advantage(&self) -> Result<Vec<HomeAdvantageRow>> {
        let mut stmt = self.conn.prepare(
            "WITH
                 home_stats AS (
                     SELECT season_id,
                            team_abbreviation_home AS team,
                            COUNT(*) AS home_games,
                            SUM(CASE WHEN wl_home = 'W' THEN 1 ELSE 0 END) AS home_wins
                     FROM game
                     WHERE CAST(season_id AS INTEGER) / 10000 = 2
                     GROUP BY season_id, team_abbreviation_home
                 ),
                 away_stats AS (
                     SELECT season_id,
                            team_abbreviation_away AS team,
                            COUNT(*) AS away_games,
                            SUM(CASE WHEN wl_away = 'W' THEN 1 ELSE 0 END) AS away_wins
                     FROM game
                     WHERE CAST(season_id AS INTEGER) / 10000 = 2
                     GROUP BY season_id, team_abbreviation_away
                 )
             SELECT
                 CAST(h.season_id AS TEXT),
                 CAST(h.season_id AS INTEGER) % 10000 AS season,
                 h.team,
                 h.home_games,
                 h.home_wins,
                 ROUND(h.home_wins * 100.0 / h.home_games, 2) AS home_win_rate,
                 a.away_games,
                 a.away_wins,
                 ROUND(a.away_wins * 100.0 / a.away_games, 2) AS away_win_rate,
                 ROUND((h.home_wins * 100.0 / h.home_games) - (a.away_wins * 100.0 / a.away_games), 2) AS ha_diff
             FROM home_stats h
             JOIN away_stats a ON h.team = a.team AND h.season_id = a.season_id
             WHERE h.home_games >= 10
             ORDER BY h.season_id DESC, ha_diff DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(HomeAdvantageRow {
                season_id: row.get(0)?,
                season: row.get(1)?,
                team: row.get(2)?,
                home_games: row.get(3)?,
                home_wins: row.get(4)?,
                home_win_rate: row.get(5)?,
                away_games: row.get(6)?,
                away_wins: row.get(7)?,
                away_win_rate: row.get(8)?,
                ha_diff: row.get(9)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// League shooting volume per season (home + away) and three-point shares
    pub fn three_point_trend(&self) -> Result<Vec<ThreePointTrendRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                 CAST(season_id AS INTEGER) % 10000 AS season,
                 COALESCE(SUM(CAST(fgm_home AS INTEGER) + CAST(fgm_away AS INTEGER)), 0) AS fgm,
                 COALESCE(SUM(CAST(fga_home AS INTEGER) + CAST(fga_away AS INTEGER)), 0) AS fga,
                 COALESCE(SUM(CAST(fg3m_home AS INTEGER) + CAST(fg3m_away AS INTEGER)), 0) AS fg3m,
                 COALESCE(SUM(CAST(fg3a_home AS INTEGER) + CAST(fg3a_away AS INTEGER)), 0) AS fg3a
             FROM game
             GROUP BY season
             ORDER BY season",
        )?;

        let rows = stmt.query_map([], |row| {
            let fgm: i64 = row.get(1)?;
            let fga: i64 = row.get(2)?;
            let fg3m: i64 = row.get(3)?;
            let fg3a: i64 = row.get(4)?;
            Ok(ThreePointTrendRow {
                season: row.get(0)?,
                fgm,
                fga,
                fg3m,
                fg3a,
                fg3a_pct: ratio(fg3a, fga),
                fg3m_pct: ratio(fg3m, fgm),
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Fourth-quarter and overtime actions from `game_pbp`, in game order.
    ///
    /// Empty (with a warning) when no play-by-play has been loaded.
    pub fn late_game_events(&self) -> Result<Vec<PlayByPlayEvent>> {
        if !self.table_exists(&GAME_PBP.table_name())? {
            warn!("table game_pbp not found; run `nba-stats fetch play-by-play` first");
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            "SELECT gameid, actionnumber, period, clock, personid, playername,
                    shotdistance, shotresult, isfieldgoal, scorehome, scoreaway,
                    actiontype, description, shotvalue
             FROM game_pbp
             WHERE period >= 4
             ORDER BY gameid, period, actionnumber",
        )?;

        let rows = stmt.query_map([], |row| {
            let mut values: Vec<SqlValue> = Vec::with_capacity(14);
            for i in 0..14 {
                values.push(row.get(i)?);
            }
            Ok(values)
        })?;

        let mut events = Vec::new();
        for row in rows {
            let v = row?;
            // Rows without a usable period cannot be placed in the game.
            let Some(period) = sql_to_i64(&v[2]) else {
                continue;
            };
            events.push(PlayByPlayEvent {
                game_id: sql_to_text(&v[0]).unwrap_or_default(),
                action_number: sql_to_i64(&v[1]).unwrap_or_default(),
                period,
                clock: sql_to_text(&v[3]),
                person_id: sql_to_i64(&v[4])
                    .filter(|id| *id > 0)
                    .map(|id| PlayerId::new(id as u64)),
                player_name: sql_to_text(&v[5]),
                shot_distance: sql_to_f64(&v[6]),
                shot_result: sql_to_text(&v[7]),
                is_field_goal: sql_to_i64(&v[8]),
                score_home: sql_to_i64(&v[9]),
                score_away: sql_to_i64(&v[10]),
                action_type: sql_to_text(&v[11]),
                description: sql_to_text(&v[12]),
                shot_value: sql_to_i64(&v[13]),
            });
        }
        Ok(events)
    }
}

fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
