use f1_stats::analytics::SeasonAnalytics;
use f1_stats::models::dataset::SeasonDataset;
use f1_stats::utils::roster::Roster;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/season_2024.json");

fn analytics() -> SeasonAnalytics {
    let dataset = SeasonDataset::from_path(FIXTURE).unwrap();
    SeasonAnalytics::new(dataset, "2024", Roster::season_2024())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn races_keep_calendar_order() {
    let races: Vec<String> = analytics().season_races().into_iter().map(|r| r.id).collect();
    assert_eq!(races, vec!["bahrain", "china", "australia"]);
}

#[test]
fn driver_ids_come_from_the_opening_race() {
    assert_eq!(
        analytics().all_driver_ids(),
        vec!["max_verstappen", "perez", "sainz", "leclerc"]
    );
}

#[test]
fn points_progression_includes_sprints_and_matches_the_total() {
    let stats = analytics().driver_season_stats("max_verstappen").unwrap();
    let running: Vec<f64> = stats.points_progression.iter().map(|p| p.points).collect();
    assert_eq!(running, vec![26.0, 59.0, 59.0]);
    assert!(close(stats.total_points, 59.0));
    assert_eq!(stats.points_progression[1].sprint_points, 8.0);

    let leclerc = analytics().driver_season_stats("leclerc").unwrap();
    let running: Vec<f64> = leclerc.points_progression.iter().map(|p| p.points).collect();
    assert_eq!(running, vec![12.0, 29.0, 48.0]);
    assert!(close(*running.last().unwrap(), leclerc.total_points));
}

#[test]
fn win_and_dnf_rates_cover_every_race() {
    let stats = analytics().driver_season_stats("max_verstappen").unwrap();
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.podiums, 2);
    assert_eq!(stats.dnfs, 1);
    assert_eq!(stats.finished_races.len(), 2);
    assert!(close(stats.average_finishing_position, 1.0));
    assert!(close(stats.win_percentage, 200.0 / 3.0));
    assert!((0.0..=100.0).contains(&stats.win_percentage));
    assert!(close(stats.dnf_rate, 100.0 / 3.0));
}

#[test]
fn grid_to_finish_delta_treats_missing_finish_as_zero() {
    let stats = analytics().driver_season_stats("perez").unwrap();
    let deltas: Vec<i64> = stats
        .qualifying_vs_race_position_delta
        .iter()
        .map(|d| d.delta)
        .collect();
    assert_eq!(deltas, vec![3, -1, 1]);

    let verstappen = analytics().driver_season_stats("max_verstappen").unwrap();
    assert_eq!(verstappen.qualifying_vs_race_position_delta[2].delta, 1);
}

#[test]
fn head_to_head_skips_races_with_an_unclassified_car() {
    let h2h = analytics().head_to_head("max_verstappen").unwrap();
    assert_eq!(h2h.teammate, "Sergio Perez");
    assert_eq!(h2h.stats.total_races, 3);
    assert_eq!(h2h.stats.completed_races, 2);
    assert_eq!(h2h.stats.driver_wins, 2);
    assert_eq!(h2h.stats.teammate_wins, 0);

    let leclerc = analytics().head_to_head("leclerc").unwrap().stats;
    assert_eq!((leclerc.driver_wins, leclerc.teammate_wins), (0, 2));
    assert!(leclerc.driver_win_percentage + leclerc.teammate_win_percentage <= 100.0);
}

#[test]
fn constructor_points_sum_race_results_only() {
    let stats = analytics().constructor_season_stats("red_bull").unwrap();
    let points: Vec<f64> = stats.races.iter().map(|r| r.points).collect();
    assert_eq!(points, vec![44.0, 40.0, 10.0]);
    assert!(close(stats.total_points, 94.0));
    assert_eq!(stats.total_dnfs, 1);

    let progression = analytics().constructor_points_progression("red_bull").unwrap();
    assert_eq!(progression.last().unwrap().cumulative_points, 94.0);
}

#[test]
fn standings_trend_finds_the_constructor_in_any_order() {
    let trend = analytics().constructor_standings_trend("red_bull").unwrap();
    let points: Vec<Option<f64>> = trend.iter().map(|t| t.points).collect();
    assert_eq!(points, vec![Some(44.0), Some(98.0), Some(108.0)]);
    assert_eq!(trend[2].position, Some(1));
}

#[test]
fn reliability_splits_finishers_and_dnfs() {
    let trend = analytics().constructor_reliability_trend("ferrari").unwrap();
    let split: Vec<(usize, usize)> = trend.iter().map(|t| (t.dnfs, t.finishers)).collect();
    assert_eq!(split, vec![(0, 2), (1, 1), (0, 2)]);
}

#[test]
fn fastest_lap_count_matches_flagged_results() {
    let analytics = analytics();
    assert_eq!(analytics.constructor_fastest_laps_count("ferrari"), Some(2));
    assert_eq!(analytics.constructor_fastest_laps_count("red_bull"), Some(1));
    assert_eq!(analytics.constructor_fastest_laps_count("williams"), Some(0));

    let trend = analytics.constructor_fastest_lap_trend("ferrari").unwrap();
    assert_eq!(trend[2].best_lap.as_deref(), Some("1:19.813"));
}

#[test]
fn pit_stop_averages_default_to_zero_without_stops() {
    let stats = analytics().constructor_pit_stop_stats("red_bull").unwrap();
    let averages: Vec<f64> = stats.races.iter().map(|r| r.average_duration).collect();
    assert!(close(averages[0], 70.0 / 3.0));
    assert!(close(averages[1], 23.5));
    assert_eq!(averages[2], 0.0);
    assert_eq!(stats.total_stops, 5);
    assert!(close(stats.average_duration, 23.4));
}

#[test]
fn an_absent_season_yields_nothing() {
    let dataset = SeasonDataset::from_path(FIXTURE).unwrap();
    let analytics = SeasonAnalytics::new(dataset, "2023", Roster::season_2024());
    assert!(analytics.driver_season_stats("max_verstappen").is_none());
    assert!(analytics.constructor_season_stats("red_bull").is_none());
    assert!(analytics.all_driver_ids().is_empty());
}
