//! Free-text questions about a driver's tyre stints at one race weekend,
//! answered from the live API.

pub mod chart;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clients::LiveClient;
use crate::models::session::{Session, Stint};
pub use chart::{LegendEntry, SessionSeries, StintChart, StintSegment};

pub const USAGE_HINT: &str = "Please provide a query with a year (e.g., 2023), driver name, and country. For example: 'What were Max Verstappen's stints in Brazil 2023?'";

pub const DRIVERS: [&str; 8] = [
    "Max Verstappen",
    "Lewis Hamilton",
    "Charles Leclerc",
    "Carlos Sainz",
    "Lando Norris",
    "George Russell",
    "Sergio Perez",
    "Fernando Alonso",
];

pub const COUNTRIES: [&str; 22] = [
    "Australia",
    "Austria",
    "Azerbaijan",
    "Bahrain",
    "Belgium",
    "Brazil",
    "Canada",
    "China",
    "Hungary",
    "Italy",
    "Japan",
    "Mexico",
    "Monaco",
    "Netherlands",
    "Saudi Arabia",
    "Singapore",
    "Spain",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
    "Qatar",
    "Las Vegas",
];

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b20\d{2}\b").expect("year pattern"));
static DRIVER: LazyLock<Regex> = LazyLock::new(|| alternation(&DRIVERS));
static COUNTRY: LazyLock<Regex> = LazyLock::new(|| alternation(&COUNTRIES));

fn alternation(options: &[&str]) -> Regex {
    let pattern = options
        .iter()
        .map(|o| regex::escape(o))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)(?:{pattern})")).expect("alternation pattern")
}

fn canonical(options: &[&'static str], matched: &str) -> String {
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(matched))
        .map(|o| o.to_string())
        .unwrap_or_else(|| matched.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatQuery {
    pub year: String,
    pub driver: String,
    pub country: String,
}

/// Pulls year, driver and country out of the question. All three must be
/// present.
pub fn extract(query: &str) -> Option<ChatQuery> {
    let year = YEAR.find(query)?.as_str().to_string();
    let driver = canonical(&DRIVERS, DRIVER.find(query)?.as_str());
    let country = canonical(&COUNTRIES, COUNTRY.find(query)?.as_str());
    Some(ChatQuery {
        year,
        driver,
        country,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub text: String,
    pub chart: Option<StintChart>,
}

impl ChatResponse {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chart: None,
        }
    }
}

#[derive(Clone)]
pub struct ChatInterpreter {
    live: LiveClient,
}

impl ChatInterpreter {
    pub fn new(live: LiveClient) -> Self {
        Self { live }
    }

    pub async fn answer(&self, query: &str) -> ChatResponse {
        info!("Processing query: {}", query);
        let Some(ChatQuery {
            year,
            driver,
            country,
        }) = extract(query)
        else {
            return ChatResponse::text_only(USAGE_HINT);
        };
        debug!("Extracted year={} driver={} country={}", year, driver, country);

        let sessions = self.live.sessions_for(&year, &country).await;
        if sessions.is_empty() {
            return ChatResponse::text_only(format!("Could not find any sessions for {country} {year}."));
        }

        let Some(driver_number) = self.live.driver_number(&driver).await else {
            return ChatResponse::text_only(format!("Could not find driver number for {driver}."));
        };

        // One session at a time, in the order the API listed them.
        let mut stinted: Vec<(Session, Vec<Stint>)> = Vec::new();
        for session in sessions {
            let Some(session_key) = session.key() else {
                continue;
            };
            let mut stints = self.live.stints(driver_number, session_key).await;
            if stints.is_empty() {
                debug!("No stints for session {}", session_key);
                continue;
            }
            stints.sort_by_key(|s| s.stint_number.unwrap_or(u32::MAX));
            stinted.push((session, stints));
        }

        if stinted.is_empty() {
            return ChatResponse::text_only(format!(
                "No stint data found for {driver} in {country} {year}."
            ));
        }

        ChatResponse {
            text: format_stints(&driver, &year, &country, &stinted),
            chart: Some(StintChart::from_sessions(&stinted)),
        }
    }
}

fn session_start(session: &Session) -> String {
    let Some(raw) = session.date_start.as_deref() else {
        return "unknown start".to_string();
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn or_unknown(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
}

pub fn format_stints(driver: &str, year: &str, country: &str, sessions: &[(Session, Vec<Stint>)]) -> String {
    let mut text = format!("{driver}'s stints in {country} {year}:\n\n");
    for (session, stints) in sessions {
        text.push_str(&format!(
            "{}: {}\n",
            session.session_name.as_deref().unwrap_or("Session"),
            session_start(session)
        ));
        for stint in stints {
            text.push_str(&format!(
                "Stint {}: Compound - {}, Laps - {} to {}, Tyre Age - {} laps at start.\n",
                or_unknown(stint.stint_number),
                stint.compound.as_deref().unwrap_or("UNKNOWN"),
                or_unknown(stint.lap_start),
                or_unknown(stint.lap_end),
                or_unknown(stint.tyre_age_at_start),
            ));
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_documented_example() {
        let query = extract("What were Max Verstappen's stints in Brazil 2023?").unwrap();
        assert_eq!(query.year, "2023");
        assert_eq!(query.driver, "Max Verstappen");
        assert_eq!(query.country, "Brazil");
    }

    #[test]
    fn matching_ignores_case_and_reports_canonical_names() {
        let query = extract("lewis hamilton in SAUDI ARABIA during 2024").unwrap();
        assert_eq!(query.driver, "Lewis Hamilton");
        assert_eq!(query.country, "Saudi Arabia");
        assert_eq!(query.year, "2024");
    }

    #[test]
    fn any_missing_part_fails_extraction() {
        assert!(extract("Max Verstappen in Brazil").is_none());
        assert!(extract("Oscar Piastri in Brazil 2023").is_none());
        assert!(extract("Max Verstappen in France 2023").is_none());
        assert!(extract("Max Verstappen in Brazil 12023").is_none());
    }

    #[test]
    fn stint_lines_follow_the_session_header() {
        let session = Session {
            session_key: Some(9205),
            session_id: None,
            session_name: Some("Race".to_string()),
            session_type: Some("Race".to_string()),
            meeting_key: None,
            meeting_name: None,
            date_start: Some("2023-11-05T17:00:00+00:00".to_string()),
            circuit_short_name: None,
            country_name: Some("Brazil".to_string()),
            year: Some(2023),
        };
        let stint = Stint {
            stint_number: Some(1),
            compound: Some("MEDIUM".to_string()),
            lap_start: Some(1),
            lap_end: Some(26),
            tyre_age_at_start: Some(0),
            session_key: Some(9205),
            driver_number: Some(1),
        };

        let text = format_stints("Max Verstappen", "2023", "Brazil", &[(session, vec![stint])]);
        assert_eq!(
            text,
            "Max Verstappen's stints in Brazil 2023:\n\n\
             Race: 2023-11-05 17:00 UTC\n\
             Stint 1: Compound - MEDIUM, Laps - 1 to 26, Tyre Age - 0 laps at start.\n\n"
        );
    }
}
