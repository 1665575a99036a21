//! Season analytics folded out of the bundled season dataset.
//!
//! Every derivation reads the dataset and recomputes from scratch; nothing is
//! cached and the dataset is never modified. Ratios over empty sets are left
//! as `NaN`, which serializes as `null`.

pub mod constructor;
pub mod driver;

use serde::Serialize;

use crate::models::dataset::{SeasonDataset, SeasonRaces};
use crate::utils::roster::Roster;

pub use constructor::{
    CircuitPoints, ConstructorPointsProgression, ConstructorRace, ConstructorSeasonStats,
    FastestLapTrend, PitStopRace, PitStopStats, ReliabilityTrend, StandingsTrend,
};
pub use driver::{DriverSeasonStats, HeadToHead, HeadToHeadStats};

pub struct SeasonAnalytics {
    dataset: SeasonDataset,
    season: String,
    roster: Roster,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSummary {
    pub id: String,
    pub name: String,
    pub circuit: String,
}

impl SeasonAnalytics {
    pub fn new(dataset: SeasonDataset, season: impl Into<String>, roster: Roster) -> Self {
        Self {
            dataset,
            season: season.into(),
            roster,
        }
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    fn races(&self) -> Option<&SeasonRaces> {
        self.dataset.season(&self.season)
    }

    /// Driver ids in the order they appear in the season's first race.
    pub fn all_driver_ids(&self) -> Vec<String> {
        let Some(first) = self.races().and_then(SeasonRaces::first) else {
            return Vec::new();
        };
        let mut ids: Vec<String> = Vec::with_capacity(first.results.race.len());
        for result in &first.results.race {
            if !ids.contains(&result.driver_id) {
                ids.push(result.driver_id.clone());
            }
        }
        ids
    }

    pub fn driver_name(&self, driver_id: &str) -> String {
        self.roster.driver_name(driver_id).to_string()
    }

    pub fn season_races(&self) -> Vec<RaceSummary> {
        self.races()
            .map(|races| {
                races
                    .entries()
                    .map(|(id, race)| RaceSummary {
                        id: id.to_string(),
                        name: race.info.name.clone(),
                        circuit: race.info.circuit.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}
