use std::sync::Arc;

use chrono::Duration;
use reqwest::Client;

use super::{get_json, or_empty};
use crate::models::{
    cache::{cache_key, ResponseCache},
    error::{Error, Result},
    race::{
        CareerDriver, CareerStats, ClassifiedResult, ConstructorStandingRow, DriverStandingRow,
        DriverSummary, FilteredStats, LastRace, MrData, MrResponse, Race, RaceOutcome, RaceResult,
        ResultFilter, ResultLine, StandingDriver, TeamSummary,
    },
};
use crate::utils::race_utils::{parse_float, parse_int};

pub const DEFAULT_STANDINGS_LIMIT: u32 = 30;

/// Client for the Ergast-compatible historical results API.
#[derive(Clone)]
pub struct HistoricalClient {
    http: Client,
    base_url: String,
    cache: Arc<ResponseCache>,
}

impl HistoricalClient {
    pub fn new(http: Client, base_url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: Arc::new(ResponseCache::new(ttl)),
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    async fn mr_data(&self, path: &str, query: &[(&str, String)]) -> Result<MrData> {
        let url = format!("{}/{}", self.base_url, path);
        let res: MrResponse = get_json(&self.http, &url, query).await?;
        Ok(res.mr_data)
    }

    async fn races(&self, path: &str, limit: u32) -> Result<Vec<Race>> {
        let data = self.mr_data(path, &[("limit", limit.to_string())]).await?;
        Ok(data.race_table.ok_or(Error::MissingField("RaceTable"))?.races)
    }

    /// Every season on record, newest first.
    pub async fn seasons(&self) -> Vec<String> {
        let res = self
            .cache
            .get_or_fetch(cache_key("seasons", &[]), || async {
                let data = self.mr_data("seasons.json", &[("limit", "100".to_string())]).await?;
                let table = data.season_table.ok_or(Error::MissingField("SeasonTable"))?;
                Ok(table.seasons.into_iter().rev().map(|s| s.season).collect())
            })
            .await;
        or_empty("seasons", res)
    }

    pub async fn drivers_for_season(&self, season: &str) -> Vec<DriverSummary> {
        let res = self
            .cache
            .get_or_fetch(cache_key("drivers", &[("season", season)]), || async {
                let data = self.mr_data(&format!("{season}/drivers.json"), &[]).await?;
                let table = data.driver_table.ok_or(Error::MissingField("DriverTable"))?;
                Ok(table.drivers.into_iter().map(DriverSummary::from).collect())
            })
            .await;
        or_empty("drivers", res)
    }

    pub async fn teams_for_season(&self, season: &str) -> Vec<TeamSummary> {
        let res = self
            .cache
            .get_or_fetch(cache_key("constructors", &[("season", season)]), || async {
                let data = self.mr_data(&format!("{season}/constructors.json"), &[]).await?;
                let table = data
                    .constructor_table
                    .ok_or(Error::MissingField("ConstructorTable"))?;
                Ok(table.constructors.into_iter().map(TeamSummary::from).collect())
            })
            .await;
        or_empty("teams", res)
    }

    /// Aggregates the first classified result of every race matching the
    /// filter.
    pub async fn filtered_stats(&self, filter: &ResultFilter) -> Option<FilteredStats> {
        let round = filter.round.as_deref().unwrap_or("last");
        let mut params: Vec<(&str, &str)> = vec![("round", round)];
        let mut path = String::new();
        if let Some(season) = filter.season.as_deref() {
            path.push_str(&format!("{season}/"));
            params.push(("season", season));
        }
        path.push_str(&format!("{round}/"));
        if let Some(driver_id) = filter.driver_id.as_deref() {
            path.push_str(&format!("drivers/{driver_id}/"));
            params.push(("driverId", driver_id));
        }
        if let Some(constructor_id) = filter.constructor_id.as_deref() {
            path.push_str(&format!("constructors/{constructor_id}/"));
            params.push(("constructorId", constructor_id));
        }
        path.push_str("results.json");

        let res = self
            .cache
            .get_or_fetch(cache_key("filtered-stats", &params), || async {
                let races = self.races(&path, 100).await?;
                Ok(Some(summarize_results(&races)))
            })
            .await;
        or_empty("filtered stats", res)
    }

    pub async fn current_driver_standings(&self) -> Vec<DriverStandingRow> {
        self.driver_standings("current", None).await
    }

    pub async fn driver_standings(&self, season: &str, limit: Option<u32>) -> Vec<DriverStandingRow> {
        let limit = limit.unwrap_or(DEFAULT_STANDINGS_LIMIT).to_string();
        let key = cache_key("driverStandings", &[("season", season), ("limit", &limit)]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                let data = self
                    .mr_data(
                        &format!("{season}/driverstandings/"),
                        &[("format", "json".to_string()), ("limit", limit.clone())],
                    )
                    .await?;
                let table = data.standings_table.ok_or(Error::MissingField("StandingsTable"))?;
                let Some(list) = table.standings_lists.into_iter().next() else {
                    return Ok(Vec::new());
                };
                Ok(list
                    .driver_standings
                    .into_iter()
                    .map(|standing| DriverStandingRow {
                        position: parse_int(standing.position.as_deref()),
                        points: parse_float(standing.points.as_deref()).unwrap_or(0.0),
                        wins: parse_int(standing.wins.as_deref()).unwrap_or(0),
                        driver: StandingDriver {
                            id: standing.driver.driver_id,
                            code: standing.driver.code,
                            number: standing.driver.permanent_number,
                            first_name: standing.driver.given_name,
                            last_name: standing.driver.family_name,
                            nationality: standing.driver.nationality,
                            team: standing.constructors.into_iter().next().map(|c| c.name),
                        },
                    })
                    .collect())
            })
            .await;
        or_empty("driver standings", res)
    }

    pub async fn constructor_standings(
        &self,
        season: &str,
        limit: Option<u32>,
    ) -> Vec<ConstructorStandingRow> {
        let limit = limit.unwrap_or(DEFAULT_STANDINGS_LIMIT).to_string();
        let key = cache_key("constructorStandings", &[("season", season), ("limit", &limit)]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                let data = self
                    .mr_data(
                        &format!("{season}/constructorstandings/"),
                        &[("format", "json".to_string()), ("limit", limit.clone())],
                    )
                    .await?;
                let table = data.standings_table.ok_or(Error::MissingField("StandingsTable"))?;
                let Some(list) = table.standings_lists.into_iter().next() else {
                    return Ok(Vec::new());
                };
                Ok(list
                    .constructor_standings
                    .into_iter()
                    .map(|standing| ConstructorStandingRow {
                        position: parse_int(standing.position.as_deref()),
                        points: parse_float(standing.points.as_deref()).unwrap_or(0.0),
                        wins: parse_int(standing.wins.as_deref()).unwrap_or(0),
                        constructor: TeamSummary::from(standing.constructor),
                    })
                    .collect())
            })
            .await;
        or_empty("constructor standings", res)
    }

    /// Career totals, championship seasons and first/last appearance.
    pub async fn driver_career_stats(&self, driver_id: &str) -> Option<CareerStats> {
        let key = cache_key(&format!("driver-{driver_id}-career"), &[]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                let driver_path = format!("drivers/{driver_id}.json");
                let results_path = format!("drivers/{driver_id}/results.json");
                let titles_path = format!("drivers/{driver_id}/driverStandings/1/seasons.json");
                let (driver_data, races, titles) = futures::try_join!(
                    self.mr_data(&driver_path, &[]),
                    self.races(&results_path, 1000),
                    self.mr_data(&titles_path, &[]),
                )?;

                let Some(driver) = driver_data
                    .driver_table
                    .and_then(|t| t.drivers.into_iter().next())
                else {
                    return Ok(None);
                };

                let championships: Vec<i32> = titles
                    .standings_table
                    .map(|t| {
                        t.standings_lists
                            .iter()
                            .filter_map(|l| l.season.parse().ok())
                            .collect()
                    })
                    .unwrap_or_default();

                let firsts: Vec<_> = races.iter().filter_map(|r| r.results.first()).collect();

                Ok(Some(CareerStats {
                    driver: CareerDriver {
                        id: driver.driver_id,
                        code: driver.code,
                        number: driver.permanent_number,
                        first_name: driver.given_name,
                        last_name: driver.family_name,
                        nationality: driver.nationality,
                        date_of_birth: driver.date_of_birth,
                    },
                    championships,
                    total_races: races.len(),
                    wins: firsts.iter().filter(|r| lead_position(r) == Some(1)).count(),
                    podiums: firsts
                        .iter()
                        .filter(|r| lead_position(r).is_some_and(|p| p <= 3))
                        .count(),
                    pole_positions: firsts
                        .iter()
                        .filter(|r| r.grid.as_deref() == Some("1"))
                        .count(),
                    fastest_laps: firsts
                        .iter()
                        .filter(|r| {
                            r.fastest_lap
                                .as_ref()
                                .is_some_and(|l| l.rank.as_deref() == Some("1"))
                        })
                        .count(),
                    points_finishes: firsts
                        .iter()
                        .filter(|r| parse_float(r.points.as_deref()).is_some_and(|p| p > 0.0))
                        .count(),
                    first_race: races
                        .first()
                        .map(|r| r.season.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    last_race: races
                        .last()
                        .map(|r| r.season.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                }))
            })
            .await;
        or_empty("driver career stats", res)
    }

    /// Full classification of the most recent race of `season`.
    pub async fn last_race_results(&self, season: &str) -> Option<LastRace> {
        let res = self
            .cache
            .get_or_fetch(cache_key("lastRace", &[("season", season)]), || async {
                let races = self.races(&format!("{season}/last/results.json"), 100).await?;
                Ok(races.into_iter().next().map(|race| LastRace {
                    circuit: race.circuit_name(),
                    results: race
                        .results
                        .iter()
                        .map(|r| ClassifiedResult {
                            position: parse_int(r.position.as_deref()),
                            driver_id: r.driver.as_ref().map(|d| d.driver_id.clone()),
                            driver_name: r
                                .driver
                                .as_ref()
                                .map(|d| format!("{} {}", d.given_name, d.family_name)),
                            constructor: r.constructor.as_ref().map(|c| c.name.clone()),
                            grid: parse_int(r.grid.as_deref()),
                            points: parse_float(r.points.as_deref()).unwrap_or(0.0),
                            status: r.status.clone(),
                        })
                        .collect(),
                    season: race.season,
                    round: race.round,
                    race_name: race.race_name,
                }))
            })
            .await;
        or_empty("last race results", res)
    }
}

fn lead_position(result: &RaceResult) -> Option<u32> {
    parse_int(result.position.as_deref())
}

/// Folds the lead result of each race. Positions that do not parse are left
/// out of the average and the best finish.
pub fn summarize_results(races: &[Race]) -> FilteredStats {
    let outcomes: Vec<RaceOutcome> = races
        .iter()
        .filter_map(|race| {
            let result = race.results.first()?;
            Some(RaceOutcome {
                round: race.round.clone(),
                race_name: race.race_name.clone(),
                date: race.date.clone(),
                circuit: race.circuit_name(),
                result: ResultLine {
                    grid: parse_int(result.grid.as_deref()),
                    position: parse_int(result.position.as_deref()),
                    points: parse_float(result.points.as_deref()).unwrap_or(0.0),
                    status: result.status.clone(),
                },
            })
        })
        .collect();

    let positions: Vec<u32> = outcomes.iter().filter_map(|o| o.result.position).collect();
    let average_finish = if positions.is_empty() {
        0.0
    } else {
        positions.iter().sum::<u32>() as f64 / positions.len() as f64
    };

    FilteredStats {
        total_races: races.len(),
        wins: positions.iter().filter(|p| **p == 1).count(),
        podiums: positions.iter().filter(|p| **p <= 3).count(),
        points_finishes: outcomes.iter().filter(|o| o.result.points > 0.0).count(),
        total_points: outcomes.iter().map(|o| o.result.points).sum(),
        average_finish,
        best_finish: positions.iter().copied().min(),
        races: outcomes,
    }
}
