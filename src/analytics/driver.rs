use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{percentage, SeasonAnalytics};
use crate::models::dataset::RaceRecord;

/// One race weekend from a driver's point of view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRaceRow {
    pub race_name: String,
    pub position: Option<u32>,
    pub race_points: f64,
    pub sprint_points: f64,
    pub points: f64,
    pub grid_position: Option<u32>,
    pub status: Option<String>,
    pub performance: Option<Value>,
    pub driver_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsProgression {
    pub race: String,
    pub race_points: f64,
    pub sprint_points: f64,
    /// Running total after this race.
    pub points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionChange {
    pub race: String,
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDelta {
    pub race: String,
    pub grid_position: Option<u32>,
    pub finish_position: Option<u32>,
    pub delta: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadRace {
    pub race: String,
    pub driver_position: Option<u32>,
    pub teammate_position: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadStats {
    pub total_races: usize,
    pub completed_races: usize,
    pub driver_wins: usize,
    pub teammate_wins: usize,
    pub driver_win_percentage: f64,
    pub teammate_win_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    pub teammate: String,
    pub head_to_head_results: Vec<HeadToHeadRace>,
    pub stats: HeadToHeadStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSeasonStats {
    pub points_progression: Vec<PointsProgression>,
    pub position_changes: Vec<PositionChange>,
    pub wins: usize,
    pub win_percentage: f64,
    pub podiums: usize,
    pub podium_percentage: f64,
    pub finished_races: Vec<DriverRaceRow>,
    pub average_finishing_position: f64,
    pub dnfs: usize,
    pub dnf_rate: f64,
    pub total_points: f64,
    pub qualifying_vs_race_position_delta: Vec<PositionDelta>,
    pub head_to_head_comparison: Option<HeadToHead>,
    pub race_results: Vec<DriverRaceRow>,
}

fn driver_row(race: &RaceRecord, driver_id: &str) -> DriverRaceRow {
    let result = race.race_result(driver_id);
    let sprint = race.sprint_result(driver_id);
    let race_points = result.map(|r| r.points).unwrap_or(0.0);
    let sprint_points = sprint.map(|r| r.points).unwrap_or(0.0);

    DriverRaceRow {
        race_name: race.info.name.clone(),
        position: result.and_then(|r| r.position),
        race_points,
        sprint_points,
        points: race_points + sprint_points,
        grid_position: result.and_then(|r| r.grid_position),
        status: result.and_then(|r| r.status.clone()),
        performance: race.driver_performance.get(driver_id).cloned(),
        driver_id: driver_id.to_string(),
    }
}

impl SeasonAnalytics {
    /// Season report for one driver, or `None` when the season is missing.
    pub fn driver_season_stats(&self, driver_id: &str) -> Option<DriverSeasonStats> {
        let races = self.races()?;
        let rows: Vec<DriverRaceRow> = races.iter().map(|race| driver_row(race, driver_id)).collect();
        let total = rows.len();
        debug!("Folding {} races for driver {}", total, driver_id);

        let mut running = 0.0;
        let points_progression = rows
            .iter()
            .map(|row| {
                running += row.points;
                PointsProgression {
                    race: row.race_name.clone(),
                    race_points: row.race_points,
                    sprint_points: row.sprint_points,
                    points: running,
                }
            })
            .collect();

        let position_changes = rows
            .iter()
            .map(|row| PositionChange {
                race: row.race_name.clone(),
                position: row.position,
            })
            .collect();

        let wins = rows.iter().filter(|r| r.position == Some(1)).count();
        let podiums = rows
            .iter()
            .filter(|r| r.position.is_some_and(|p| p <= 3))
            .count();

        let finished_races: Vec<DriverRaceRow> =
            rows.iter().filter(|r| r.position.is_some()).cloned().collect();
        let position_sum: u32 = finished_races.iter().filter_map(|r| r.position).sum();
        let average_finishing_position = position_sum as f64 / finished_races.len() as f64;

        let dnfs = rows
            .iter()
            .filter(|r| r.status.as_deref() != Some("Finished"))
            .count();

        let qualifying_vs_race_position_delta = rows
            .iter()
            .map(|row| PositionDelta {
                race: row.race_name.clone(),
                grid_position: row.grid_position,
                finish_position: row.position,
                delta: i64::from(row.grid_position.unwrap_or(0)) - i64::from(row.position.unwrap_or(0)),
            })
            .collect();

        Some(DriverSeasonStats {
            points_progression,
            position_changes,
            wins,
            win_percentage: percentage(wins, total),
            podiums,
            podium_percentage: percentage(podiums, total),
            finished_races,
            average_finishing_position,
            dnfs,
            dnf_rate: percentage(dnfs, total),
            total_points: rows.iter().map(|r| r.points).sum(),
            qualifying_vs_race_position_delta,
            head_to_head_comparison: self.head_to_head(driver_id),
            race_results: rows,
        })
    }

    /// Race-by-race comparison with the roster teammate. A lower position
    /// wins; races where either car is unclassified are left out of the
    /// tally.
    pub fn head_to_head(&self, driver_id: &str) -> Option<HeadToHead> {
        let Some(team) = self.roster.team_of(driver_id) else {
            warn!("No team found for driver: {}", driver_id);
            return None;
        };
        let Some(teammate) = self.roster.teammate_of(driver_id) else {
            warn!("No single teammate for {} at {}", driver_id, team);
            return None;
        };
        let races = self.races()?;

        let results: Vec<HeadToHeadRace> = races
            .iter()
            .map(|race| HeadToHeadRace {
                race: race.info.name.clone(),
                driver_position: race.race_result(driver_id).and_then(|r| r.position),
                teammate_position: race.race_result(teammate).and_then(|r| r.position),
            })
            .collect();

        let completed: Vec<(u32, u32)> = results
            .iter()
            .filter_map(|r| Some((r.driver_position?, r.teammate_position?)))
            .collect();
        let driver_wins = completed.iter().filter(|(d, t)| d < t).count();
        let teammate_wins = completed.iter().filter(|(d, t)| t < d).count();

        Some(HeadToHead {
            teammate: self.driver_name(teammate),
            stats: HeadToHeadStats {
                total_races: results.len(),
                completed_races: completed.len(),
                driver_wins,
                teammate_wins,
                driver_win_percentage: percentage(driver_wins, completed.len()),
                teammate_win_percentage: percentage(teammate_wins, completed.len()),
            },
            head_to_head_results: results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dataset::SeasonDataset;
    use crate::utils::roster::Roster;
    use serde_json::json;

    fn analytics(races: Value) -> SeasonAnalytics {
        let dataset = json!({ "races": { "2024": races } });
        SeasonAnalytics::new(
            SeasonDataset::from_json(&dataset.to_string()).unwrap(),
            "2024",
            Roster::season_2024(),
        )
    }

    #[test]
    fn missing_result_counts_as_dnf_with_zero_points() {
        let analytics = analytics(json!({
            "r1": {"info": {"name": "One"}, "results": {"race": [
                {"driverId": "perez", "constructorId": "red_bull", "position": 2,
                 "points": 18, "gridPosition": 3, "status": "Finished"}
            ]}},
            "r2": {"info": {"name": "Two"}, "results": {"race": []}}
        }));

        let stats = analytics.driver_season_stats("perez").unwrap();
        assert_eq!(stats.dnfs, 1);
        assert_eq!(stats.dnf_rate, 50.0);
        assert_eq!(stats.total_points, 18.0);
        assert_eq!(stats.position_changes[1].position, None);
        assert_eq!(stats.qualifying_vs_race_position_delta[0].delta, 1);
        assert_eq!(stats.qualifying_vs_race_position_delta[1].delta, 0);
    }

    #[test]
    fn disqualification_is_a_dnf() {
        let analytics = analytics(json!({
            "r1": {"info": {"name": "One"}, "results": {"race": [
                {"driverId": "hamilton", "constructorId": "mercedes", "position": null,
                 "points": 0, "gridPosition": 1, "status": "Disqualified"}
            ]}}
        }));

        let stats = analytics.driver_season_stats("hamilton").unwrap();
        assert_eq!(stats.dnfs, 1);
        assert!(stats.average_finishing_position.is_nan());
        assert_eq!(stats.qualifying_vs_race_position_delta[0].delta, 1);
    }

    #[test]
    fn head_to_head_without_completed_races_is_nan() {
        let analytics = analytics(json!({
            "r1": {"info": {"name": "One"}, "results": {"race": [
                {"driverId": "norris", "constructorId": "mclaren", "position": 1,
                 "points": 25, "status": "Finished"},
                {"driverId": "piastri", "constructorId": "mclaren", "position": null,
                 "points": 0, "status": "Engine"}
            ]}}
        }));

        let h2h = analytics.head_to_head("norris").unwrap();
        assert_eq!(h2h.teammate, "Oscar Piastri");
        assert_eq!(h2h.stats.completed_races, 0);
        assert!(h2h.stats.driver_win_percentage.is_nan());
    }

    #[test]
    fn tied_positions_count_for_neither() {
        let analytics = analytics(json!({
            "r1": {"info": {"name": "One"}, "results": {"race": [
                {"driverId": "alonso", "constructorId": "aston_martin", "position": 5,
                 "points": 10, "status": "Finished"},
                {"driverId": "stroll", "constructorId": "aston_martin", "position": 5,
                 "points": 10, "status": "Finished"}
            ]}}
        }));

        let stats = analytics.head_to_head("alonso").unwrap().stats;
        assert_eq!(stats.driver_wins + stats.teammate_wins, 0);
        assert_eq!(stats.driver_win_percentage + stats.teammate_win_percentage, 0.0);
    }

    #[test]
    fn unknown_season_is_none() {
        let analytics = SeasonAnalytics::new(
            SeasonDataset::from_json(r#"{"races": {}}"#).unwrap(),
            "2024",
            Roster::season_2024(),
        );
        assert!(analytics.driver_season_stats("max_verstappen").is_none());
        assert!(analytics.all_driver_ids().is_empty());
    }

    #[test]
    fn head_to_head_needs_a_rostered_pair() {
        let analytics = analytics(json!({
            "r1": {"info": {"name": "One"}, "results": {"race": [
                {"driverId": "bearman", "constructorId": "ferrari", "position": 7,
                 "points": 6, "status": "Finished"}
            ]}}
        }));

        assert!(analytics.head_to_head("bearman").is_none());
        let stats = analytics.driver_season_stats("bearman").unwrap();
        assert!(stats.head_to_head_comparison.is_none());
        assert_eq!(stats.total_points, 6.0);
    }
}
