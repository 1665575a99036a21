use serde::Serialize;

use super::SeasonAnalytics;
use crate::models::dataset::{DriverResult, RaceRecord};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorDriverResult {
    pub driver_id: String,
    pub position: Option<u32>,
    pub points: f64,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorRace {
    pub race: String,
    pub circuit: String,
    pub points: f64,
    pub dnfs: usize,
    pub drivers: Vec<ConstructorDriverResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorSeasonStats {
    pub constructor_id: String,
    pub races: Vec<ConstructorRace>,
    pub total_points: f64,
    pub total_dnfs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandingsTrend {
    pub race: String,
    pub position: Option<u32>,
    pub points: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorPointsProgression {
    pub race: String,
    pub points: f64,
    pub cumulative_points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityTrend {
    pub race: String,
    pub dnfs: usize,
    pub finishers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CircuitPoints {
    pub circuit: String,
    pub points: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FastestLapTrend {
    pub race: String,
    pub best_lap_seconds: Option<f64>,
    pub best_lap: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitStopRace {
    pub race: String,
    pub stops: usize,
    pub total_duration: f64,
    pub average_duration: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitStopStats {
    pub races: Vec<PitStopRace>,
    pub total_stops: usize,
    pub average_duration: f64,
}

fn mean_or_zero(total: f64, count: usize) -> f64 {
    total / count.max(1) as f64
}

impl SeasonAnalytics {
    /// Applies `f` to every race with the constructor's results for it.
    fn per_constructor_race<'a, T>(
        &'a self,
        constructor_id: &'a str,
        mut f: impl FnMut(&'a RaceRecord, Vec<&'a DriverResult>) -> T,
    ) -> Option<Vec<T>> {
        let races = self.races()?;
        Some(
            races
                .iter()
                .map(|race| f(race, race.constructor_results(constructor_id).collect()))
                .collect(),
        )
    }

    pub fn constructor_season_stats(&self, constructor_id: &str) -> Option<ConstructorSeasonStats> {
        let races = self.per_constructor_race(constructor_id, |race, results| ConstructorRace {
            race: race.info.name.clone(),
            circuit: race.info.circuit.clone(),
            points: results.iter().map(|r| r.points).sum(),
            dnfs: results.iter().filter(|r| !r.finished()).count(),
            drivers: results
                .iter()
                .map(|r| ConstructorDriverResult {
                    driver_id: r.driver_id.clone(),
                    position: r.position,
                    points: r.points,
                    status: r.status.clone(),
                })
                .collect(),
        })?;

        Some(ConstructorSeasonStats {
            constructor_id: constructor_id.to_string(),
            total_points: races.iter().map(|r| r.points).sum(),
            total_dnfs: races.iter().map(|r| r.dnfs).sum(),
            races,
        })
    }

    pub fn constructor_standings_trend(&self, constructor_id: &str) -> Option<Vec<StandingsTrend>> {
        let races = self.races()?;
        Some(
            races
                .iter()
                .map(|race| {
                    let standing = race
                        .standings
                        .constructors
                        .iter()
                        .find(|s| s.constructor_id == constructor_id);
                    StandingsTrend {
                        race: race.info.name.clone(),
                        position: standing.and_then(|s| s.position),
                        points: standing.and_then(|s| s.points),
                    }
                })
                .collect(),
        )
    }

    pub fn constructor_points_progression(
        &self,
        constructor_id: &str,
    ) -> Option<Vec<ConstructorPointsProgression>> {
        let mut running = 0.0;
        self.per_constructor_race(constructor_id, |race, results| {
            let points: f64 = results.iter().map(|r| r.points).sum();
            running += points;
            ConstructorPointsProgression {
                race: race.info.name.clone(),
                points,
                cumulative_points: running,
            }
        })
    }

    pub fn constructor_reliability_trend(&self, constructor_id: &str) -> Option<Vec<ReliabilityTrend>> {
        self.per_constructor_race(constructor_id, |race, results| {
            let dnfs = results.iter().filter(|r| !r.finished()).count();
            ReliabilityTrend {
                race: race.info.name.clone(),
                dnfs,
                finishers: results.len() - dnfs,
            }
        })
    }

    /// Points per circuit in order of first visit; repeat visits accumulate.
    pub fn constructor_points_by_circuit(&self, constructor_id: &str) -> Option<Vec<CircuitPoints>> {
        let per_race = self.per_constructor_race(constructor_id, |race, results| {
            (race.info.circuit.clone(), results.iter().map(|r| r.points).sum::<f64>())
        })?;

        let mut circuits: Vec<CircuitPoints> = Vec::new();
        for (circuit, points) in per_race {
            match circuits.iter_mut().find(|c| c.circuit == circuit) {
                Some(existing) => existing.points += points,
                None => circuits.push(CircuitPoints { circuit, points }),
            }
        }
        Some(circuits)
    }

    /// Quickest recorded lap per race across the constructor's cars.
    pub fn constructor_fastest_lap_trend(&self, constructor_id: &str) -> Option<Vec<FastestLapTrend>> {
        self.per_constructor_race(constructor_id, |race, results| {
            let best = results
                .iter()
                .filter_map(|r| {
                    let lap = r.fastest_lap.as_ref()?;
                    Some((lap.seconds()?, lap.time.clone()))
                })
                .min_by(|a, b| a.0.total_cmp(&b.0));
            FastestLapTrend {
                race: race.info.name.clone(),
                best_lap_seconds: best.as_ref().map(|(seconds, _)| *seconds),
                best_lap: best.and_then(|(_, time)| time),
            }
        })
    }

    /// Number of results flagged as the race's fastest lap.
    pub fn constructor_fastest_laps_count(&self, constructor_id: &str) -> Option<usize> {
        let counts = self.per_constructor_race(constructor_id, |_, results| {
            results
                .iter()
                .filter(|r| r.fastest_lap.as_ref().is_some_and(|l| l.is_fastest))
                .count()
        })?;
        Some(counts.into_iter().sum())
    }

    /// Stop counts and mean stationary time. Stops without a readable
    /// duration are skipped; a race with no stops averages 0.
    pub fn constructor_pit_stop_stats(&self, constructor_id: &str) -> Option<PitStopStats> {
        let races = self.per_constructor_race(constructor_id, |race, results| {
            let durations: Vec<f64> = results
                .iter()
                .flat_map(|r| r.pit_stops.iter().filter_map(|s| s.duration))
                .collect();
            let total_duration: f64 = durations.iter().sum();
            PitStopRace {
                race: race.info.name.clone(),
                stops: durations.len(),
                total_duration,
                average_duration: mean_or_zero(total_duration, durations.len()),
            }
        })?;

        let total_stops = races.iter().map(|r| r.stops).sum();
        let total_duration: f64 = races.iter().map(|r| r.total_duration).sum();
        Some(PitStopStats {
            average_duration: mean_or_zero(total_duration, total_stops),
            total_stops,
            races,
        })
    }
}
