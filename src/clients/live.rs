use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, info};

use super::{get_json, or_empty};
use crate::models::{
    cache::{cache_key, ResponseCache},
    error::Result,
    session::{
        DriverEntry, EntrantStats, LiveDriver, LiveResult, LiveTeam, Meeting, RaceSession,
        RaceStats, Session, Stint, TeamEntry,
    },
};

/// Client for the OpenF1 live timing API.
#[derive(Clone)]
pub struct LiveClient {
    http: Client,
    base_url: String,
    cache: Arc<ResponseCache>,
}

impl LiveClient {
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

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T> {
        get_json(&self.http, &format!("{}/{}", self.base_url, endpoint), query).await
    }

    async fn race_sessions(&self, season: i32) -> Result<Vec<Session>> {
        self.get(
            "sessions",
            &[("year", season.to_string()), ("session_type", "Race".to_string())],
        )
        .await
    }

    pub async fn races(&self, season: i32) -> Vec<RaceSession> {
        let season_param = season.to_string();
        let res = self
            .cache
            .get_or_fetch(cache_key("races", &[("season", &season_param)]), || async {
                let sessions = self.race_sessions(season).await?;
                Ok(sessions.into_iter().map(RaceSession::from).collect())
            })
            .await;
        or_empty("races", res)
    }

    /// Everyone who started a race in `season`, one entry per car number,
    /// sorted by name.
    pub async fn drivers(&self, season: i32) -> Vec<DriverEntry> {
        let season_param = season.to_string();
        let res = self
            .cache
            .get_or_fetch(cache_key("drivers", &[("season", &season_param)]), || async {
                let sessions = self.race_sessions(season).await?;
                if sessions.is_empty() {
                    info!("No sessions found for season: {}", season);
                    return Ok(Vec::new());
                }

                let requests = sessions.iter().filter_map(Session::key).map(|key| async move {
                    self.get::<Vec<LiveDriver>>("drivers", &[("session_key", key.to_string())])
                        .await
                });
                let responses = join_all(requests).await;

                let mut all = Vec::new();
                for response in responses {
                    all.extend(response?);
                }
                debug!("Fetched {} driver rows for season {}", all.len(), season);
                Ok(dedupe_drivers(all))
            })
            .await;
        or_empty("drivers", res)
    }

    pub async fn teams(&self, season: i32) -> Vec<TeamEntry> {
        let season_param = season.to_string();
        let res = self
            .cache
            .get_or_fetch(cache_key("teams", &[("season", &season_param)]), || async {
                let teams: Vec<LiveTeam> = self.get("constructors", &[("year", season.to_string())]).await?;
                Ok(dedupe_teams(teams))
            })
            .await;
        or_empty("teams", res)
    }

    pub async fn driver_stats(&self, driver_number: u32, season: i32) -> Option<EntrantStats> {
        let (number, year) = (driver_number.to_string(), season.to_string());
        let key = cache_key("driverStats", &[("driverId", &number), ("season", &year)]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                let query = [("driver_number", number.clone()), ("year", year.clone())];
                let drivers: Vec<LiveDriver> = self.get("drivers", &query).await?;
                let Some(driver) = drivers.into_iter().next() else {
                    return Ok(None);
                };
                let results: Vec<LiveResult> = self.get("results", &query).await?;
                let name = format!(
                    "{} {}",
                    driver.first_name.unwrap_or_default(),
                    driver.last_name.unwrap_or_default()
                );
                Ok(Some(entrant_stats(Some(name), &results, season)))
            })
            .await;
        or_empty("driver stats", res)
    }

    pub async fn team_stats(&self, team_id: i64, season: i32) -> Option<EntrantStats> {
        let (team, year) = (team_id.to_string(), season.to_string());
        let key = cache_key("teamStats", &[("teamId", &team), ("season", &year)]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                let results: Vec<LiveResult> = self
                    .get("results", &[("team_id", team.clone()), ("year", year.clone())])
                    .await?;
                let Some(first) = results.first() else {
                    return Ok(None);
                };
                Ok(Some(entrant_stats(first.team_name.clone(), &results, season)))
            })
            .await;
        or_empty("team stats", res)
    }

    pub async fn race_stats(&self, race_id: i64, season: i32) -> Option<RaceStats> {
        let (race, year) = (race_id.to_string(), season.to_string());
        let key = cache_key("raceStats", &[("raceId", &race), ("season", &year)]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                let sessions: Vec<Session> =
                    self.get("sessions", &[("session_key", race.clone())]).await?;
                let Some(session) = sessions.into_iter().next() else {
                    return Ok(None);
                };
                let mut results: Vec<LiveResult> =
                    self.get("results", &[("session_key", race.clone())]).await?;
                results.sort_by_key(|r| r.position.unwrap_or(u32::MAX));

                Ok(Some(RaceStats {
                    name: session.meeting_name,
                    winner: results
                        .first()
                        .map(LiveResult::full_name)
                        .unwrap_or_else(|| "Unknown".to_string()),
                    fastest_lap: results
                        .iter()
                        .filter_map(|r| r.fastest_lap_time)
                        .min_by(f64::total_cmp),
                    podium: results.iter().take(3).map(LiveResult::full_name).collect(),
                    season,
                }))
            })
            .await;
        or_empty("race stats", res)
    }

    /// All sessions of the meeting held in `country` in `year`.
    pub async fn sessions_for(&self, year: &str, country: &str) -> Vec<Session> {
        let key = cache_key("sessions", &[("year", year), ("country", country)]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                self.get("sessions", &[("year", year.to_string()), ("country_name", country.to_string())])
                    .await
            })
            .await;
        or_empty("session info", res)
    }

    /// Car number for a driver, matched on full name ignoring case.
    pub async fn driver_number(&self, full_name: &str) -> Option<u32> {
        let wanted = full_name.to_lowercase();
        let res = self
            .cache
            .get_or_fetch(cache_key("driverNumber", &[("name", &wanted)]), || async {
                let drivers: Vec<LiveDriver> = self.get("drivers", &[]).await?;
                Ok(drivers
                    .into_iter()
                    .find(|d| d.full_name.as_deref().is_some_and(|n| n.to_lowercase() == wanted))
                    .and_then(|d| d.driver_number))
            })
            .await;
        or_empty("driver number", res)
    }

    pub async fn stints(&self, driver_number: u32, session_key: i64) -> Vec<Stint> {
        let (driver, session) = (driver_number.to_string(), session_key.to_string());
        let key = cache_key("stints", &[("driverNumber", &driver), ("sessionKey", &session)]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                self.get(
                    "stints",
                    &[("driver_number", driver.clone()), ("session_key", session.clone())],
                )
                .await
            })
            .await;
        or_empty("stints", res)
    }

    pub async fn meeting_key(&self, year: &str, country: &str) -> Option<i64> {
        let key = cache_key("meetingKey", &[("year", year), ("country", country)]);
        let res = self
            .cache
            .get_or_fetch(key, || async {
                let meetings: Vec<Meeting> = self
                    .get("meetings", &[("year", year.to_string()), ("country_name", country.to_string())])
                    .await?;
                Ok(meetings.into_iter().next().and_then(|m| m.meeting_key))
            })
            .await;
        or_empty("meeting key", res)
    }
}

fn entrant_stats(name: Option<String>, results: &[LiveResult], season: i32) -> EntrantStats {
    EntrantStats {
        name,
        wins: results.iter().filter(|r| r.position == Some(1)).count(),
        podiums: results
            .iter()
            .filter(|r| r.position.is_some_and(|p| p <= 3))
            .count(),
        points: results.iter().filter_map(|r| r.points).sum(),
        season,
    }
}

/// Drops incomplete rows, keeps the first row seen per car number and sorts
/// by name.
pub fn dedupe_drivers(drivers: Vec<LiveDriver>) -> Vec<DriverEntry> {
    let mut seen = HashSet::new();
    let mut entries: Vec<DriverEntry> = drivers
        .into_iter()
        .filter_map(|d| {
            let number = d.driver_number?;
            let name = format!("{} {}", d.first_name?, d.last_name?);
            Some(DriverEntry {
                id: number,
                name,
                number,
                team: d.team_name.unwrap_or_else(|| "Unknown Team".to_string()),
            })
        })
        .filter(|entry| seen.insert(entry.id))
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

pub fn dedupe_teams(teams: Vec<LiveTeam>) -> Vec<TeamEntry> {
    let mut seen = HashSet::new();
    let mut entries: Vec<TeamEntry> = teams
        .into_iter()
        .filter_map(|t| {
            Some(TeamEntry {
                name: t.team_name?,
                id: t.constructor_id.or(t.team_id),
                country: t.country.unwrap_or_else(|| "Unknown".to_string()),
            })
        })
        .filter(|entry| seen.insert(entry.name.clone()))
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
