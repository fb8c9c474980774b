//! Moving averages and league-wide series derived from season tables.

use std::collections::BTreeMap;

use crate::storage::{HomeAdvantageRow, HomeAdvantageTrendRow, TREND_WINDOW};

/// Trailing mean over `window` values; `None` until the window is full.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let slice = &values[i + 1 - window..=i];
                Some(slice.iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}

/// Mean home advantage over all teams of each season, oldest first,
/// with its 3-season moving average.
pub fn home_advantage_trend(rows: &[HomeAdvantageRow]) -> Vec<HomeAdvantageTrendRow> {
    let mut by_season: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = by_season.entry(row.season_id.as_str()).or_insert((0.0, 0));
        entry.0 += row.ha_diff;
        entry.1 += 1;
    }

    let means: Vec<(String, f64)> = by_season
        .into_iter()
        .map(|(season_id, (sum, count))| (season_id.to_string(), sum / count as f64))
        .collect();
    let diffs: Vec<f64> = means.iter().map(|(_, mean)| *mean).collect();

    means
        .into_iter()
        .zip(rolling_mean(&diffs, TREND_WINDOW))
        .map(|((season_id, ha_diff), ha_diff_ma3)| HomeAdvantageTrendRow {
            season_id,
            ha_diff,
            ha_diff_ma3,
        })
        .collect()
}
