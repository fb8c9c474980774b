//! Game clock parsing for nba.com v3 play-by-play (`PT04M32.00S`).

/// Seconds left in the period, e.g. `PT04M32.00S` → `272.0`.
///
/// Either component may be missing (`PT45.20S`, `PT05M`); anything that is
/// not an ISO-8601 period clock yields `None`.
pub fn parse_game_clock(clock: &str) -> Option<f64> {
    let body = clock.trim().strip_prefix("PT")?;
    if body.is_empty() {
        return None;
    }

    let (minutes, rest) = match body.split_once('M') {
        Some((m, rest)) => (m.parse::<u32>().ok()?, rest),
        None => (0, body),
    };

    let seconds = match rest.strip_suffix('S') {
        Some(s) if !s.is_empty() => s.parse::<f64>().ok().filter(|s| *s >= 0.0)?,
        Some(_) => return None,
        None if rest.is_empty() => 0.0,
        None => return None,
    };

    Some(f64::from(minutes) * 60.0 + seconds)
}

/// Seconds remaining with missing or malformed clocks counted as zero,
/// matching how the play-by-play feed marks end-of-period actions.
pub fn seconds_remaining(clock: Option<&str>) -> f64 {
    clock.and_then(parse_game_clock).unwrap_or(0.0)
}
