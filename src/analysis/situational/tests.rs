//! Tests for clutch and garbage-time reports

use super::*;

struct Shot {
    game: &'static str,
    number: i64,
    period: i64,
    clock: &'static str,
    score: Option<(i64, i64)>,
}

fn at(
    game: &'static str,
    number: i64,
    period: i64,
    clock: &'static str,
    score: Option<(i64, i64)>,
) -> Shot {
    Shot {
        game,
        number,
        period,
        clock,
        score,
    }
}

fn base(player: u64, name: &str, shot: Shot) -> PlayByPlayEvent {
    PlayByPlayEvent {
        game_id: shot.game.to_string(),
        action_number: shot.number,
        period: shot.period,
        clock: Some(shot.clock.to_string()),
        person_id: Some(PlayerId::new(player)),
        player_name: Some(name.to_string()),
        score_home: shot.score.map(|(h, _)| h),
        score_away: shot.score.map(|(_, a)| a),
        ..Default::default()
    }
}

fn field_goal(
    player: u64,
    name: &str,
    shot: Shot,
    value: i64,
    made: bool,
    distance: f64,
) -> PlayByPlayEvent {
    PlayByPlayEvent {
        shot_distance: Some(distance),
        shot_result: Some(if made { "Made" } else { "Missed" }.to_string()),
        is_field_goal: Some(1),
        action_type: Some(if made { "Made Shot" } else { "Missed Shot" }.to_string()),
        shot_value: Some(value),
        ..base(player, name, shot)
    }
}

fn free_throw(player: u64, name: &str, shot: Shot, description: &str) -> PlayByPlayEvent {
    PlayByPlayEvent {
        is_field_goal: Some(0),
        action_type: Some("Free Throw".to_string()),
        description: Some(description.to_string()),
        ..base(player, name, shot)
    }
}

const CURRY: u64 = 201939;
const JAMES: u64 = 2544;

fn sample_events() -> Vec<PlayByPlayEvent> {
    vec![
        // Game A, close in the fourth
        field_goal(
            CURRY,
            "Curry",
            at("0022300001", 600, 4, "PT04M00.00S", Some((100, 98))),
            3,
            true,
            26.0,
        ),
        field_goal(
            CURRY,
            "Curry",
            at("0022300001", 610, 4, "PT03M00.00S", Some((100, 101))),
            2,
            false,
            5.0,
        ),
        free_throw(
            CURRY,
            "Curry",
            at("0022300001", 620, 4, "PT02M00.00S", Some((103, 101))),
            "Curry Free Throw 1 of 2 (1 PTS)",
        ),
        free_throw(
            CURRY,
            "Curry",
            at("0022300001", 621, 4, "PT02M00.00S", Some((103, 101))),
            "MISS Curry Free Throw 2 of 2",
        ),
        // Too early in the quarter
        field_goal(
            CURRY,
            "Curry",
            at("0022300001", 500, 4, "PT06M00.00S", Some((95, 95))),
            2,
            true,
            3.0,
        ),
        // Game B, overtime
        field_goal(
            CURRY,
            "Curry",
            at("0022300002", 700, 5, "PT01M00.00S", Some((110, 108))),
            2,
            true,
            12.0,
        ),
        // Game C, blowout
        field_goal(
            CURRY,
            "Curry",
            at("0022300003", 650, 4, "PT02M00.00S", Some((120, 100))),
            3,
            true,
            25.0,
        ),
        // No score recorded
        field_goal(
            CURRY,
            "Curry",
            at("0022300003", 660, 4, "PT01M00.00S", None),
            2,
            true,
            1.0,
        ),
        field_goal(
            JAMES,
            "James",
            at("0022300001", 630, 4, "PT01M30.00S", Some((103, 103))),
            2,
            true,
            2.0,
        ),
    ]
}

#[test]
fn test_situation_boundaries() {
    let clutch = GameSituation::Clutch;
    assert!(clutch.includes(4, 300.0, 5));
    assert!(clutch.includes(6, 0.0, 0));
    assert!(!clutch.includes(3, 10.0, 0));
    assert!(!clutch.includes(4, 300.5, 0));
    assert!(!clutch.includes(4, 100.0, 6));

    let garbage = GameSituation::GarbageTime;
    assert!(!garbage.includes(4, 100.0, 15));
    assert!(garbage.includes(4, 100.0, 16));
    assert!(!garbage.includes(4, 301.0, 30));
}

#[test]
fn test_situation_names() {
    use clap::ValueEnum;

    assert_eq!(
        GameSituation::from_str("clutch", false).unwrap(),
        GameSituation::Clutch
    );
    assert_eq!(
        GameSituation::from_str("Garbage-Time", true).unwrap(),
        GameSituation::GarbageTime
    );
    assert!(GameSituation::from_str("overtime", true).is_err());
    // CLI names, labels and serde names agree
    for situation in GameSituation::value_variants() {
        let name = situation.to_possible_value().unwrap();
        assert_eq!(name.get_name(), situation.label());
        assert_eq!(
            serde_json::to_value(situation).unwrap(),
            serde_json::Value::from(situation.label())
        );
    }
}

#[test]
fn test_clutch_report() {
    let analyzer = SituationalAnalyzer::from_events(sample_events());
    let report = analyzer
        .analyze_player(GameSituation::Clutch, &PlayerSelector::Id(PlayerId::new(CURRY)))
        .unwrap();

    assert_eq!(report.player, "Curry");
    assert_eq!(report.player_id, Some(PlayerId::new(CURRY)));
    assert_eq!(report.game_count, 2);
    assert_eq!((report.fga, report.fgm), (3, 2));
    assert_eq!((report.fg3a, report.fg3m), (1, 1));
    assert_eq!((report.fta, report.ftm), (2, 1));
    assert_eq!(report.points, 6);

    assert!((report.fg_pct - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(report.fg3_pct, 1.0);
    assert_eq!(report.ft_pct, 0.5);
    assert!((report.fg3_rate - 1.0 / 3.0).abs() < 1e-12);
    assert!((report.ts_pct - 6.0 / (2.0 * (3.0 + 0.44 * 2.0))).abs() < 1e-12);
}

#[test]
fn test_shot_distance_profile() {
    let analyzer = SituationalAnalyzer::from_events(sample_events());
    let report = analyzer
        .analyze_player(GameSituation::Clutch, &PlayerSelector::Id(PlayerId::new(CURRY)))
        .unwrap();
    let profile = &report.shot_distance;

    assert!((profile.avg_distance.unwrap() - 43.0 / 3.0).abs() < 1e-12);
    let counts: Vec<(&str, u32, u32)> = profile
        .buckets
        .iter()
        .map(|b| (b.label.as_str(), b.attempts, b.made))
        .collect();
    assert_eq!(
        counts,
        vec![("0-9 ft", 1, 0), ("10-23 ft", 1, 1), ("24+ ft", 1, 1)]
    );
}

#[test]
fn test_garbage_time_report() {
    let analyzer = SituationalAnalyzer::from_events(sample_events());
    let report = analyzer
        .analyze_player(
            GameSituation::GarbageTime,
            &PlayerSelector::Name("Curry".to_string()),
        )
        .unwrap();

    assert_eq!(report.player, "Curry");
    assert_eq!(report.player_id, Some(PlayerId::new(CURRY)));
    assert_eq!(report.game_count, 1);
    assert_eq!(report.points, 3);
    assert_eq!(report.fta, 0);
    assert_eq!(report.ft_pct, 0.0);
    assert_eq!(report.ts_pct, 1.5);
}

#[test]
fn test_missing_score_is_excluded() {
    let events = vec![field_goal(
        CURRY,
        "Curry",
        Shot { game: "0022300003", number: 660, period: 4, clock: "PT01M00.00S", score: None },
        2,
        true,
        1.0,
    )];
    let analyzer = SituationalAnalyzer::from_events(events);
    let selector = PlayerSelector::Id(PlayerId::new(CURRY));

    assert!(analyzer.analyze_player(GameSituation::Clutch, &selector).is_none());
    assert!(analyzer.analyze_player(GameSituation::GarbageTime, &selector).is_none());
}

#[test]
fn test_unparsable_clock_counts_as_end_of_period() {
    let events = vec![field_goal(
        JAMES,
        "James",
        at("0022300004", 1, 4, "", Some((90, 90))),
        2,
        true,
        4.0,
    )];
    let analyzer = SituationalAnalyzer::from_events(events);

    let report = analyzer
        .analyze_player(GameSituation::Clutch, &PlayerSelector::Id(PlayerId::new(JAMES)))
        .unwrap();
    assert_eq!(report.points, 2);
}

#[test]
fn test_unknown_player_has_no_report() {
    let analyzer = SituationalAnalyzer::from_events(sample_events());
    assert!(analyzer
        .analyze_player(GameSituation::Clutch, &PlayerSelector::Name("Nobody".to_string()))
        .is_none());
    // Repeated lookups are served from the report cache
    assert!(analyzer
        .analyze_player(GameSituation::Clutch, &PlayerSelector::Name("Nobody".to_string()))
        .is_none());
}

#[test]
fn test_compare_players_sorted_by_true_shooting() {
    let analyzer = SituationalAnalyzer::from_events(sample_events());
    let reports = analyzer.compare_players(
        GameSituation::Clutch,
        &[PlayerId::new(CURRY), PlayerId::new(999), PlayerId::new(JAMES)],
    );

    let players: Vec<&str> = reports.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(players, vec!["James", "Curry"]);
    assert_eq!(reports[0].ts_pct, 1.0);
}

#[test]
fn test_compare_players_ignores_repeated_ids() {
    let analyzer = SituationalAnalyzer::from_events(sample_events());
    let reports = analyzer.compare_players(
        GameSituation::Clutch,
        &[
            PlayerId::new(JAMES),
            PlayerId::new(CURRY),
            PlayerId::new(JAMES),
            PlayerId::new(CURRY),
        ],
    );

    let players: Vec<&str> = reports.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(players, vec!["James", "Curry"]);
}

#[test]
fn test_report_row_flattens_distance() {
    let analyzer = SituationalAnalyzer::from_events(sample_events());
    let report = analyzer
        .analyze_player(GameSituation::GarbageTime, &PlayerSelector::Id(PlayerId::new(CURRY)))
        .unwrap();

    let row = SituationalReportRow::from(&report);
    assert_eq!(row.player_id, Some(CURRY));
    assert_eq!(row.avg_shot_distance, Some(25.0));
    assert_eq!(row.points, 3);
}
