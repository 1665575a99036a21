//! Live (OpenF1) API records and the shapes derived from them.

use serde::{Deserialize, Serialize};

use crate::utils::race_utils::{de_opt_seconds, de_opt_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_key: Option<i64>,
    #[serde(default)]
    pub session_id: Option<i64>,
    pub session_name: Option<String>,
    pub session_type: Option<String>,
    pub meeting_key: Option<i64>,
    pub meeting_name: Option<String>,
    pub date_start: Option<String>,
    pub circuit_short_name: Option<String>,
    pub country_name: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveDriver {
    pub driver_number: Option<u32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveTeam {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub constructor_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveResult {
    pub position: Option<u32>,
    pub points: Option<f64>,
    pub team_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_seconds")]
    pub fastest_lap_time: Option<f64>,
}

impl LiveResult {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stint {
    pub stint_number: Option<u32>,
    pub compound: Option<String>,
    pub lap_start: Option<u32>,
    pub lap_end: Option<u32>,
    pub tyre_age_at_start: Option<u32>,
    pub session_key: Option<i64>,
    pub driver_number: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    pub meeting_key: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSession {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub circuit: Option<String>,
}

impl Session {
    /// `session_key`, or the older `session_id` when only that is present.
    pub fn key(&self) -> Option<i64> {
        self.session_key.or(self.session_id)
    }
}

impl From<Session> for RaceSession {
    fn from(session: Session) -> Self {
        Self {
            id: session.key(),
            name: session.meeting_name,
            date: session.date_start,
            circuit: session.circuit_short_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverEntry {
    pub id: u32,
    pub name: String,
    pub number: u32,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub id: Option<String>,
    pub name: String,
    pub country: String,
}

/// Season totals for a driver or a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrantStats {
    pub name: Option<String>,
    pub wins: usize,
    pub podiums: usize,
    pub points: f64,
    pub season: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceStats {
    pub name: Option<String>,
    pub winner: String,
    pub fastest_lap: Option<f64>,
    pub podium: Vec<String>,
    pub season: i32,
}
