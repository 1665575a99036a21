//! Historical (Ergast-style) API: wire records as served under `MRData`, and
//! the normalized shapes handed to callers.

use serde::{Deserialize, Serialize};

use crate::utils::race_utils::not_available;

#[derive(Debug, Deserialize)]
pub struct MrResponse {
    #[serde(rename = "MRData")]
    pub mr_data: MrData,
}

#[derive(Debug, Default, Deserialize)]
pub struct MrData {
    #[serde(rename = "SeasonTable")]
    pub season_table: Option<SeasonTable>,
    #[serde(rename = "DriverTable")]
    pub driver_table: Option<DriverTable>,
    #[serde(rename = "ConstructorTable")]
    pub constructor_table: Option<ConstructorTable>,
    #[serde(rename = "RaceTable")]
    pub race_table: Option<RaceTable>,
    #[serde(rename = "StandingsTable")]
    pub standings_table: Option<StandingsTable>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonTable {
    #[serde(rename = "Seasons", default)]
    pub seasons: Vec<SeasonEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SeasonEntry {
    pub season: String,
}

#[derive(Debug, Deserialize)]
pub struct DriverTable {
    #[serde(rename = "Drivers", default)]
    pub drivers: Vec<Driver>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Driver {
    #[serde(rename = "driverId")]
    pub driver_id: String,
    pub code: Option<String>,
    #[serde(rename = "permanentNumber")]
    pub permanent_number: Option<String>,
    #[serde(rename = "givenName", default)]
    pub given_name: String,
    #[serde(rename = "familyName", default)]
    pub family_name: String,
    pub nationality: Option<String>,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConstructorTable {
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<Constructor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Constructor {
    #[serde(rename = "constructorId")]
    pub constructor_id: String,
    #[serde(default)]
    pub name: String,
    pub nationality: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RaceTable {
    #[serde(rename = "Races", default)]
    pub races: Vec<Race>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Race {
    pub season: String,
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    pub date: Option<String>,
    #[serde(rename = "Circuit")]
    pub circuit: Option<Circuit>,
    #[serde(rename = "Results", default)]
    pub results: Vec<RaceResult>,
}

impl Race {
    pub fn circuit_name(&self) -> String {
        self.circuit
            .as_ref()
            .map(|c| c.circuit_name.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Circuit {
    #[serde(rename = "circuitId")]
    pub circuit_id: Option<String>,
    #[serde(rename = "circuitName", default)]
    pub circuit_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaceResult {
    pub position: Option<String>,
    pub points: Option<String>,
    pub grid: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "Driver")]
    pub driver: Option<Driver>,
    #[serde(rename = "Constructor")]
    pub constructor: Option<Constructor>,
    #[serde(rename = "FastestLap")]
    pub fastest_lap: Option<ResultFastestLap>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultFastestLap {
    pub rank: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsTable {
    #[serde(rename = "StandingsLists", default)]
    pub standings_lists: Vec<StandingsList>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsList {
    pub season: String,
    #[serde(rename = "DriverStandings", default)]
    pub driver_standings: Vec<DriverStanding>,
    #[serde(rename = "ConstructorStandings", default)]
    pub constructor_standings: Vec<ConstructorStanding>,
}

#[derive(Debug, Deserialize)]
pub struct DriverStanding {
    pub position: Option<String>,
    pub points: Option<String>,
    pub wins: Option<String>,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<Constructor>,
}

#[derive(Debug, Deserialize)]
pub struct ConstructorStanding {
    pub position: Option<String>,
    pub points: Option<String>,
    pub wins: Option<String>,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummary {
    pub id: String,
    pub code: Option<String>,
    pub number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
}

impl From<Driver> for DriverSummary {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.driver_id,
            code: driver.code,
            number: driver.permanent_number,
            first_name: driver.given_name,
            last_name: driver.family_name,
            nationality: driver.nationality,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub nationality: Option<String>,
}

impl From<Constructor> for TeamSummary {
    fn from(constructor: Constructor) -> Self {
        Self {
            id: constructor.constructor_id,
            name: constructor.name,
            nationality: constructor.nationality,
        }
    }
}

/// Narrows a results query. Unset segments are left out of the URL; the
/// round defaults to `last`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultFilter {
    pub season: Option<String>,
    pub round: Option<String>,
    pub driver_id: Option<String>,
    pub constructor_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLine {
    pub grid: Option<u32>,
    pub position: Option<u32>,
    pub points: f64,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceOutcome {
    pub round: String,
    pub race_name: String,
    pub date: Option<String>,
    pub circuit: String,
    pub result: ResultLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredStats {
    pub total_races: usize,
    pub wins: usize,
    pub podiums: usize,
    pub points_finishes: usize,
    pub total_points: f64,
    pub average_finish: f64,
    #[serde(with = "not_available")]
    pub best_finish: Option<u32>,
    pub races: Vec<RaceOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingDriver {
    pub id: String,
    pub code: Option<String>,
    pub number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverStandingRow {
    pub position: Option<u32>,
    pub points: f64,
    pub wins: u32,
    pub driver: StandingDriver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorStandingRow {
    pub position: Option<u32>,
    pub points: f64,
    pub wins: u32,
    pub constructor: TeamSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerDriver {
    pub id: String,
    pub code: Option<String>,
    pub number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStats {
    pub driver: CareerDriver,
    pub championships: Vec<i32>,
    pub total_races: usize,
    pub wins: usize,
    pub podiums: usize,
    pub pole_positions: usize,
    pub fastest_laps: usize,
    pub points_finishes: usize,
    pub first_race: String,
    pub last_race: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedResult {
    pub position: Option<u32>,
    pub driver_id: Option<String>,
    pub driver_name: Option<String>,
    pub constructor: Option<String>,
    pub grid: Option<u32>,
    pub points: f64,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRace {
    pub season: String,
    pub round: String,
    pub race_name: String,
    pub circuit: String,
    pub results: Vec<ClassifiedResult>,
}
