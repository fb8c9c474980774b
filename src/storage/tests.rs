//! Unit tests for storage functionality

use super::*;
use crate::{nba::ResultSet, PlayerId};
use serde_json::{json, Value};

fn create_test_db() -> NbaDatabase {
    NbaDatabase::new_in_memory().unwrap()
}

fn result_set(headers: &[&str], rows: Vec<Vec<Value>>) -> ResultSet {
    ResultSet::new(
        "Test",
        headers.iter().map(|h| h.to_string()).collect(),
        rows,
    )
}

fn create_game_tables(db: &NbaDatabase) {
    db.execute_batch(
        "CREATE TABLE game (
             season_id TEXT, game_id TEXT,
             team_abbreviation_home TEXT, wl_home TEXT,
             team_abbreviation_away TEXT, wl_away TEXT,
             fgm_home REAL, fga_home REAL, fg3m_home REAL, fg3a_home REAL,
             fgm_away REAL, fga_away REAL, fg3m_away REAL, fg3a_away REAL
         );
         CREATE TABLE game_info (game_id TEXT, game_date TEXT, attendance INTEGER, game_time TEXT);",
    )
    .unwrap();
}

fn insert_game(
    db: &NbaDatabase,
    season_id: &str,
    game_id: &str,
    home: &str,
    away: &str,
    home_won: bool,
) {
    let (wl_home, wl_away) = if home_won { ("W", "L") } else { ("L", "W") };
    db.execute_batch(&format!(
        "INSERT INTO game VALUES ('{season_id}', '{game_id}', '{home}', '{wl_home}', '{away}', '{wl_away}',
                                  40, 85, 12, 35, 38, 88, 10, 30);"
    ))
    .unwrap();
}

#[test]
fn test_database_creation() {
    let db = create_test_db();
    assert!(db.table_exists("fetch_log").unwrap());
    assert!(db.table_exists("FETCH_LOG").unwrap());
    assert!(!db.table_exists("game").unwrap());
}

#[test]
fn test_validate_identifier() {
    assert!(validate_identifier("game_pbp").is_ok());
    assert!(validate_identifier("_x1").is_ok());
    assert!(validate_identifier("1game").is_err());
    assert!(validate_identifier("game; DROP TABLE game").is_err());
    assert!(validate_identifier("").is_err());
}

#[test]
fn test_save_result_set_creates_table() {
    let mut db = create_test_db();
    let set = result_set(
        &["PERSON_ID", "DISPLAY_FIRST_LAST", "ROSTERSTATUS"],
        vec![
            vec![json!(2544), json!("LeBron James"), json!(1)],
            vec![json!(201939), json!("Stephen Curry"), json!(1)],
        ],
    );

    let written = db
        .save_result_set(&PLAYER_INFO, &set, WriteMode::Replace)
        .unwrap();
    assert_eq!(written, 2);
    assert_eq!(db.table_row_count("player_info").unwrap(), Some(2));

    let columns = db.table_columns("player_info").unwrap();
    assert!(columns.contains("person_id"));
    assert!(columns.contains("display_first_last"));
}

#[test]
fn test_replace_drops_previous_rows() {
    let mut db = create_test_db();
    let first = result_set(&["PERSON_ID"], vec![vec![json!(1)], vec![json!(2)]]);
    let second = result_set(&["PERSON_ID"], vec![vec![json!(3)]]);

    db.save_result_set(&PLAYER_INFO, &first, WriteMode::Replace)
        .unwrap();
    db.save_result_set(&PLAYER_INFO, &second, WriteMode::Replace)
        .unwrap();

    let ids = db.existing_ids("player_info", "PERSON_ID").unwrap();
    assert_eq!(ids.len(), 1);
    assert!(ids.contains("3"));
}

#[test]
fn test_failed_replace_keeps_previous_rows() {
    let mut db = create_test_db();
    let first = result_set(&["PERSON_ID"], vec![vec![json!(1)], vec![json!(2)]]);
    db.save_result_set(&PLAYER_INFO, &first, WriteMode::Replace)
        .unwrap();

    // PERSON_ID is an INTEGER primary key, so the text id fails mid-insert
    let broken = result_set(&["PERSON_ID"], vec![vec![json!(3)], vec![json!("x")]]);
    assert!(db
        .save_result_set(&PLAYER_INFO, &broken, WriteMode::Replace)
        .is_err());

    assert_eq!(db.table_row_count("player_info").unwrap(), Some(2));
    let ids = db.existing_ids("player_info", "PERSON_ID").unwrap();
    assert!(ids.contains("1"));
    assert!(ids.contains("2"));
    assert!(!ids.contains("3"));
}

#[test]
fn test_append_replaces_rows_with_same_key() {
    let mut db = create_test_db();
    let headers = ["PLAYER_ID", "SEASON_ID", "TEAM_ID", "PTS"];
    let first = result_set(
        &headers,
        vec![
            vec![json!(2544), json!("2022-23"), json!(1610612747), json!(1590)],
            vec![json!(2544), json!("2023-24"), json!(1610612747), json!(1822)],
        ],
    );
    // Same key as the second row with corrected points, plus a new season
    let second = result_set(
        &headers,
        vec![
            vec![json!(2544), json!("2023-24"), json!(1610612747), json!(1825)],
            vec![json!(2544), json!("2024-25"), json!(1610612747), json!(1708)],
        ],
    );

    db.save_result_set(&PLAYER_STATS, &first, WriteMode::Append)
        .unwrap();
    db.save_result_set(&PLAYER_STATS, &second, WriteMode::Append)
        .unwrap();

    assert_eq!(db.table_row_count("player_stats").unwrap(), Some(3));
    let pts: i64 = db
        .conn
        .query_row(
            "SELECT PTS FROM player_stats WHERE SEASON_ID = '2023-24'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(pts, 1825);
}

#[test]
fn test_append_adds_new_columns() {
    let mut db = create_test_db();
    let first = result_set(&["GAME_ID", "TEAM_ID"], vec![vec![json!("0022300001"), json!(1)]]);
    let second = result_set(
        &["GAME_ID", "TEAM_ID", "PTS"],
        vec![vec![json!("0022300002"), json!(1), json!(110)]],
    );

    db.save_result_set(&GAME_LOG, &first, WriteMode::Append)
        .unwrap();
    db.save_result_set(&GAME_LOG, &second, WriteMode::Append)
        .unwrap();

    assert!(db.table_columns("game_log").unwrap().contains("pts"));
    assert_eq!(db.table_row_count("game_log").unwrap(), Some(2));
}

#[test]
fn test_result_set_without_key_columns_is_stored_unkeyed() {
    let mut db = create_test_db();
    let set = result_set(&["NAME"], vec![vec![json!("a")], vec![json!("a")]]);

    db.save_result_set(&PLAYER_INFO, &set, WriteMode::Append)
        .unwrap();
    assert_eq!(db.table_row_count("player_info").unwrap(), Some(2));
}

#[test]
fn test_empty_result_set_is_skipped() {
    let mut db = create_test_db();
    let set = result_set(&["PERSON_ID"], vec![]);

    let written = db
        .save_result_set(&PLAYER_INFO, &set, WriteMode::Replace)
        .unwrap();
    assert_eq!(written, 0);
    assert!(!db.table_exists("player_info").unwrap());
}

#[test]
fn test_existing_ids_missing_table_or_column() {
    let mut db = create_test_db();
    assert!(db.existing_ids("player_stats", "PLAYER_ID").unwrap().is_empty());

    let set = result_set(&["PERSON_ID"], vec![vec![json!(7)]]);
    db.save_result_set(&PLAYER_INFO, &set, WriteMode::Replace)
        .unwrap();
    assert!(db.existing_ids("player_info", "TEAM_ID").unwrap().is_empty());
    assert!(db.existing_ids("player info", "PERSON_ID").is_err());
}

#[test]
fn test_record_and_list_fetches() {
    let mut db = create_test_db();
    db.record_fetch("commonallplayers", "Season=2023-24", 5000)
        .unwrap();
    db.record_fetch("leaguegamefinder", "Season=2023-24", 2460)
        .unwrap();

    let fetches = db.recent_fetches(10).unwrap();
    assert_eq!(fetches.len(), 2);
    // Same second: newest id first
    assert_eq!(fetches[0].endpoint, "leaguegamefinder");
    assert_eq!(fetches[0].row_count, 2460);

    assert_eq!(db.recent_fetches(1).unwrap().len(), 1);
}

#[test]
fn test_game_duration_trend() {
    let db = create_test_db();
    create_game_tables(&db);
    insert_game(&db, "22022", "0022200001", "BOS", "NYK", true);
    insert_game(&db, "22022", "0022200002", "NYK", "BOS", true);
    insert_game(&db, "22023", "0022300001", "BOS", "NYK", true);
    insert_game(&db, "42023", "0042300001", "BOS", "NYK", true);
    db.execute_batch(
        "INSERT INTO game_info VALUES ('0022200001', '2022-10-18', 19156, '2:10');
         INSERT INTO game_info VALUES ('0022200002', '2022-10-20', 19812, '2:20');
         INSERT INTO game_info VALUES ('0022300001', '2023-10-25', 19156, '2:05');
         INSERT INTO game_info VALUES ('0042300001', '2024-04-21', 19156, '2:30');",
    )
    .unwrap();

    let trend = db.game_duration_trend().unwrap();
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].season_id, "22022");
    assert_eq!(trend[0].season_year, 2022);
    assert_eq!(trend[0].avg_duration, 135.0);
    assert_eq!(trend[1].avg_duration, 125.0);
    assert_eq!(trend[1].duration_ma3, None);
}

#[test]
fn test_game_duration_skips_malformed_times() {
    let db = create_test_db();
    create_game_tables(&db);
    insert_game(&db, "22023", "0022300001", "BOS", "NYK", true);
    insert_game(&db, "22023", "0022300002", "BOS", "NYK", true);
    db.execute_batch(
        "INSERT INTO game_info VALUES ('0022300001', '2023-10-25', 19156, '2:00');
         INSERT INTO game_info VALUES ('0022300002', '2023-10-27', 19156, 'unknown');",
    )
    .unwrap();

    let trend = db.game_duration_trend().unwrap();
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].avg_duration, 120.0);
}

#[test]
fn test_home_advantage() {
    let db = create_test_db();
    create_game_tables(&db);
    for i in 0..10 {
        insert_game(&db, "22023", &format!("00223000{i:02}"), "BOS", "NYK", i < 8);
        insert_game(&db, "22023", &format!("00223001{i:02}"), "NYK", "BOS", i < 4);
    }
    // Playoff games do not count
    insert_game(&db, "42023", "0042300001", "BOS", "NYK", false);

    let rows = db.home_advantage().unwrap();
    assert_eq!(rows.len(), 2);

    let bos = rows.iter().find(|r| r.team == "BOS").unwrap();
    assert_eq!(bos.season, 2023);
    assert_eq!(bos.home_games, 10);
    assert_eq!(bos.home_wins, 8);
    assert_eq!(bos.home_win_rate, 80.0);
    assert_eq!(bos.away_games, 10);
    assert_eq!(bos.away_wins, 6);
    assert_eq!(bos.away_win_rate, 60.0);
    assert_eq!(bos.ha_diff, 20.0);

    let nyk = rows.iter().find(|r| r.team == "NYK").unwrap();
    assert_eq!(nyk.home_win_rate, 40.0);
    assert_eq!(nyk.away_win_rate, 20.0);
}

#[test]
fn test_home_advantage_requires_ten_home_games() {
    let db = create_test_db();
    create_game_tables(&db);
    for i in 0..9 {
        insert_game(&db, "22023", &format!("00223000{i:02}"), "BOS", "NYK", true);
        insert_game(&db, "22023", &format!("00223001{i:02}"), "NYK", "BOS", true);
    }

    assert!(db.home_advantage().unwrap().is_empty());
}

#[test]
fn test_three_point_trend_sums_both_teams() {
    let db = create_test_db();
    create_game_tables(&db);
    insert_game(&db, "22023", "0022300001", "BOS", "NYK", true);
    insert_game(&db, "22023", "0022300002", "NYK", "BOS", true);

    let trend = db.three_point_trend().unwrap();
    assert_eq!(trend.len(), 1);
    let season = &trend[0];
    assert_eq!(season.season, 2023);
    assert_eq!(season.fgm, 156);
    assert_eq!(season.fga, 346);
    assert_eq!(season.fg3m, 44);
    assert_eq!(season.fg3a, 130);
    assert!((season.fg3a_pct - 130.0 / 346.0).abs() < 1e-12);
    assert!((season.fg3m_pct - 44.0 / 156.0).abs() < 1e-12);
}

#[test]
fn test_late_game_events_without_play_by_play() {
    let db = create_test_db();
    assert!(db.late_game_events().unwrap().is_empty());
}

#[test]
fn test_late_game_events() {
    let mut db = create_test_db();
    let set = result_set(
        &[
            "gameId", "actionNumber", "clock", "period", "personId", "playerName",
            "shotDistance", "shotResult", "isFieldGoal", "scoreHome", "scoreAway",
            "actionType", "description", "shotValue",
        ],
        vec![
            vec![
                json!("0022300001"), json!(10), json!("PT11M40.00S"), json!(1), json!(2544),
                json!("James"), json!(3), json!("Made"), json!(1), json!("2"), json!("0"),
                json!("Made Shot"), json!("James 3' Layup (2 PTS)"), json!(2),
            ],
            vec![
                json!("0022300001"), json!(612), json!("PT02M10.00S"), json!(4), json!(2544),
                json!("James"), json!(26), json!("Missed"), json!(1), json!("101"), json!("99"),
                json!("Missed Shot"), json!("MISS James 26' 3PT"), json!(3),
            ],
            vec![
                json!("0022300001"), json!(611), json!("PT02M30.00S"), json!(4), json!(0),
                json!(""), json!(null), json!(""), json!(0), json!(""), json!(""),
                json!("period"), json!(null), json!(0),
            ],
        ],
    );
    db.save_result_set(&GAME_PBP, &set, WriteMode::Append)
        .unwrap();

    let events = db.late_game_events().unwrap();
    assert_eq!(events.len(), 2);

    // Ordered by action number within the period
    assert_eq!(events[0].action_number, 611);
    assert_eq!(events[0].person_id, None);
    assert_eq!(events[0].score_home, None);

    let shot = &events[1];
    assert_eq!(shot.period, 4);
    assert_eq!(shot.person_id, Some(PlayerId::new(2544)));
    assert_eq!(shot.shot_distance, Some(26.0));
    assert_eq!(shot.score_home, Some(101));
    assert_eq!(shot.score_away, Some(99));
    assert_eq!(shot.shot_value, Some(3));
    assert_eq!(shot.clock.as_deref(), Some("PT02M10.00S"));
}
