//! `analyze` commands: run an analysis, print it, export it as CSV

use super::common::{
    file_slug, format_optional, format_pct, open_database, print_json, save_export,
};
use crate::{
    analysis::{
        home_advantage_trend, GameSituation, PlayerSelector, SituationalAnalyzer,
        SituationalReport, SituationalReportRow,
    },
    cli::{AnalyzeCmd, OutputArgs, PlayerArgs},
    config::{ProjectPaths, SubTask},
    error::NbaError,
    storage::{DurationTrendRow, HomeAdvantageRow, HomeAdvantageTrendRow, ThreePointTrendRow},
    Result,
};

/// Handle the analyze commands
pub fn handle_analyze(paths: &ProjectPaths, cmd: AnalyzeCmd) -> Result<()> {
    let db = open_database(paths)?;

    match cmd {
        AnalyzeCmd::Duration { output } => {
            let rows = db.game_duration_trend()?;
            emit(&output, &rows, print_duration)?;
            if !output.no_save {
                save_export(paths, SubTask::Duration, "reg_season_duration.csv", &rows)?;
            }
        }

        AnalyzeCmd::HomeAdvantage { trend, output } => {
            let rows = db.home_advantage()?;
            if trend {
                let trend_rows = home_advantage_trend(&rows);
                emit(&output, &trend_rows, print_home_advantage_trend)?;
                if !output.no_save {
                    save_export(
                        paths,
                        SubTask::HomeAdvantage,
                        "home_advantage_trend.csv",
                        &trend_rows,
                    )?;
                }
            } else {
                emit(&output, &rows, print_home_advantage)?;
                if !output.no_save {
                    save_export(paths, SubTask::HomeAdvantage, "home_advantage.csv", &rows)?;
                }
            }
        }

        AnalyzeCmd::ThreePoint { output } => {
            let rows = db.three_point_trend()?;
            emit(&output, &rows, print_three_point)?;
            if !output.no_save {
                save_export(paths, SubTask::ThreePoint, "three_point_trend.csv", &rows)?;
            }
        }

        AnalyzeCmd::Clutch { player, output } => {
            let analyzer = SituationalAnalyzer::load(&db)?;
            run_player_report(paths, &analyzer, GameSituation::Clutch, player, &output)?;
        }

        AnalyzeCmd::GarbageTime { player, output } => {
            let analyzer = SituationalAnalyzer::load(&db)?;
            run_player_report(paths, &analyzer, GameSituation::GarbageTime, player, &output)?;
        }

        AnalyzeCmd::Compare {
            situation,
            player_ids,
            output,
        } => {
            let analyzer = SituationalAnalyzer::load(&db)?;
            let reports = analyzer.compare_players(situation, &player_ids);

            emit(&output, &reports, print_reports)?;
            if !output.no_save && !reports.is_empty() {
                let rows: Vec<SituationalReportRow> = reports.iter().map(Into::into).collect();
                save_export(
                    paths,
                    situation_task(situation),
                    &format!("{}_comparison.csv", situation_task(situation).dir_name()),
                    &rows,
                )?;
            }
        }
    }

    Ok(())
}

fn situation_task(situation: GameSituation) -> SubTask {
    match situation {
        GameSituation::Clutch => SubTask::Clutch,
        GameSituation::GarbageTime => SubTask::GarbageTime,
    }
}

pub fn player_selector(args: PlayerArgs) -> Result<PlayerSelector> {
    match (args.player_id, args.player_name) {
        (Some(id), None) => Ok(PlayerSelector::Id(id)),
        (None, Some(name)) => Ok(PlayerSelector::Name(name.trim().to_string())),
        // clap's argument group enforces exactly one
        _ => Err(NbaError::Other(anyhow::anyhow!(
            "pass exactly one of --player-id or --player-name"
        ))),
    }
}

fn run_player_report(
    paths: &ProjectPaths,
    analyzer: &SituationalAnalyzer,
    situation: GameSituation,
    player: PlayerArgs,
    output: &OutputArgs,
) -> Result<()> {
    let selector = player_selector(player)?;
    let Some(report) = analyzer.analyze_player(situation, &selector) else {
        println!("No {situation} play-by-play data found for {selector}.");
        return Ok(());
    };

    let reports = [report];
    emit(output, &reports, print_reports)?;
    if !output.no_save {
        let rows: Vec<SituationalReportRow> = reports.iter().map(Into::into).collect();
        let task = situation_task(situation);
        save_export(
            paths,
            task,
            &format!("{}_{}.csv", task.dir_name(), file_slug(&selector.to_string())),
            &rows,
        )?;
    }
    Ok(())
}

fn emit<T: serde::Serialize>(output: &OutputArgs, rows: &[T], print: fn(&[T])) -> Result<()> {
    if output.json {
        print_json(rows)
    } else {
        print(rows);
        Ok(())
    }
}

fn print_duration(rows: &[DurationTrendRow]) {
    if rows.is_empty() {
        println!("No regular-season games with a game time found.");
        return;
    }
    println!("{:<8} {:>12} {:>12}", "Season", "Avg (min)", "3-season MA");
    for row in rows {
        println!(
            "{:<8} {:>12.1} {:>12}",
            row.season_year,
            row.avg_duration,
            format_optional(row.duration_ma3, 1)
        );
    }
}

fn print_home_advantage(rows: &[HomeAdvantageRow]) {
    if rows.is_empty() {
        println!("No team seasons with at least 10 home games found.");
        return;
    }
    println!(
        "{:<7} {:<5} {:>9} {:>9} {:>9}",
        "Season", "Team", "Home W%", "Away W%", "Diff"
    );
    for row in rows {
        println!(
            "{:<7} {:<5} {:>9.2} {:>9.2} {:>9.2}",
            row.season, row.team, row.home_win_rate, row.away_win_rate, row.ha_diff
        );
    }
}

fn print_home_advantage_trend(rows: &[HomeAdvantageTrendRow]) {
    if rows.is_empty() {
        println!("No team seasons with at least 10 home games found.");
        return;
    }
    println!("{:<9} {:>10} {:>12}", "Season", "HA diff", "3-season MA");
    for row in rows {
        println!(
            "{:<9} {:>10.2} {:>12}",
            row.season_id,
            row.ha_diff,
            format_optional(row.ha_diff_ma3, 2)
        );
    }
}

fn print_three_point(rows: &[ThreePointTrendRow]) {
    if rows.is_empty() {
        println!("No games found.");
        return;
    }
    println!(
        "{:<7} {:>8} {:>8} {:>8} {:>8} {:>9} {:>9}",
        "Season", "FGM", "FGA", "3PM", "3PA", "3PA/FGA", "3PM/FGM"
    );
    for row in rows {
        println!(
            "{:<7} {:>8} {:>8} {:>8} {:>8} {:>9} {:>9}",
            row.season,
            row.fgm,
            row.fga,
            row.fg3m,
            row.fg3a,
            format_pct(row.fg3a_pct),
            format_pct(row.fg3m_pct)
        );
    }
}

fn print_reports(reports: &[SituationalReport]) {
    if reports.is_empty() {
        println!("No play-by-play data found for the requested players.");
        return;
    }
    for report in reports {
        let id = report
            .player_id
            .map(|id| format!(" ({id})"))
            .unwrap_or_default();
        println!("{}{id} - {}", report.player, report.situation);
        println!("  Games: {}  Points: {}", report.game_count, report.points);
        println!(
            "  FG {}/{} ({})  3P {}/{} ({})  FT {}/{} ({})",
            report.fgm,
            report.fga,
            format_pct(report.fg_pct),
            report.fg3m,
            report.fg3a,
            format_pct(report.fg3_pct),
            report.ftm,
            report.fta,
            format_pct(report.ft_pct)
        );
        println!(
            "  TS%: {}  3PA rate: {}  Avg shot distance: {} ft",
            format_pct(report.ts_pct),
            format_pct(report.fg3_rate),
            format_optional(report.shot_distance.avg_distance, 1)
        );
        for bucket in &report.shot_distance.buckets {
            println!(
                "    {:<9} {}/{} ({})",
                bucket.label,
                bucket.made,
                bucket.attempts,
                format_pct(bucket.pct)
            );
        }
    }
}
