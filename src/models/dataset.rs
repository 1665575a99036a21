use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::error::Result;
use crate::utils::race_utils::{de_null_default, de_opt_seconds, parse_lap_time};

/// Bundled results for one or more seasons: `races[season][raceId]`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonDataset {
    #[serde(default)]
    pub races: HashMap<String, SeasonRaces>,
}

impl SeasonDataset {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn season(&self, season: &str) -> Option<&SeasonRaces> {
        self.races.get(season)
    }
}

/// Races of a season in document order, which is chronological.
#[derive(Debug, Clone, Default)]
pub struct SeasonRaces(Vec<(String, RaceRecord)>);

impl SeasonRaces {
    pub fn iter(&self) -> impl Iterator<Item = &RaceRecord> {
        self.0.iter().map(|(_, race)| race)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &RaceRecord)> {
        self.0.iter().map(|(id, race)| (id.as_str(), race))
    }

    pub fn first(&self) -> Option<&RaceRecord> {
        self.0.first().map(|(_, race)| race)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for SeasonRaces {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RacesVisitor;

        impl<'de> Visitor<'de> for RacesVisitor {
            type Value = SeasonRaces;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of race id to race record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<SeasonRaces, A::Error> {
                let mut races = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, race)) = map.next_entry::<String, RaceRecord>()? {
                    races.push((id, race));
                }
                Ok(SeasonRaces(races))
            }
        }

        deserializer.deserialize_map(RacesVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRecord {
    pub info: RaceInfo,
    pub results: RaceResults,
    #[serde(default, deserialize_with = "de_null_default")]
    pub standings: Standings,
    #[serde(default, deserialize_with = "de_null_default")]
    pub driver_performance: HashMap<String, Value>,
}

impl RaceRecord {
    pub fn race_result(&self, driver_id: &str) -> Option<&DriverResult> {
        self.results.race.iter().find(|r| r.driver_id == driver_id)
    }

    pub fn sprint_result(&self, driver_id: &str) -> Option<&DriverResult> {
        self.results
            .sprint
            .as_ref()?
            .results
            .iter()
            .find(|r| r.driver_id == driver_id)
    }

    pub fn constructor_results<'a>(&'a self, constructor_id: &'a str) -> impl Iterator<Item = &'a DriverResult> {
        self.results
            .race
            .iter()
            .filter(move |r| r.constructor_id == constructor_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaceInfo {
    pub name: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub circuit: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaceResults {
    #[serde(default, deserialize_with = "de_null_default")]
    pub race: Vec<DriverResult>,
    pub sprint: Option<SprintResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SprintResults {
    #[serde(default, deserialize_with = "de_null_default")]
    pub results: Vec<DriverResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Standings {
    #[serde(default, deserialize_with = "de_null_default")]
    pub constructors: Vec<ConstructorStanding>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorStanding {
    pub constructor_id: String,
    pub position: Option<u32>,
    pub points: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResult {
    pub driver_id: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub constructor_id: String,
    pub position: Option<u32>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub points: f64,
    pub grid_position: Option<u32>,
    pub status: Option<String>,
    pub fastest_lap: Option<FastestLap>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub pit_stops: Vec<PitStop>,
}

impl DriverResult {
    pub fn finished(&self) -> bool {
        self.status.as_deref() == Some("Finished")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastestLap {
    pub time: Option<String>,
    pub lap: Option<u32>,
    #[serde(default, deserialize_with = "de_null_default")]
    pub is_fastest: bool,
}

impl FastestLap {
    pub fn seconds(&self) -> Option<f64> {
        self.time.as_deref().and_then(parse_lap_time)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PitStop {
    pub lap: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_seconds")]
    pub duration: Option<f64>,
}
