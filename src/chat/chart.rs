use serde::Serialize;

use crate::models::session::{Session, Stint};
use crate::utils::race_utils::{compound_color, map_compound, COMPOUND_LEGEND};

/// Horizontal bar chart data: one row per session, one bar per stint.
#[derive(Debug, Clone, Serialize)]
pub struct StintChart {
    pub series: Vec<SessionSeries>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSeries {
    pub session: String,
    pub session_key: Option<i64>,
    pub segments: Vec<StintSegment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StintSegment {
    pub session: String,
    pub stint: Option<u32>,
    pub compound: &'static str,
    pub lap_start: u32,
    pub lap_end: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub compound: &'static str,
    pub color: &'static str,
}

impl StintChart {
    pub fn from_sessions(sessions: &[(Session, Vec<Stint>)]) -> Self {
        let series = sessions
            .iter()
            .map(|(session, stints)| {
                let name = session.session_name.as_deref().unwrap_or("Session");
                SessionSeries {
                    session: name.to_string(),
                    session_key: session.key(),
                    segments: stints.iter().map(|s| StintSegment::new(name, s)).collect(),
                }
            })
            .collect();

        Self {
            series,
            legend: COMPOUND_LEGEND
                .iter()
                .map(|&(compound, color)| LegendEntry { compound, color })
                .collect(),
        }
    }
}

impl StintSegment {
    pub fn new(session: &str, stint: &Stint) -> Self {
        let compound = map_compound(stint.compound.as_deref().unwrap_or_default());
        let lap_start = stint.lap_start.unwrap_or(0);
        Self {
            session: session.to_string(),
            stint: stint.stint_number,
            compound,
            lap_start,
            lap_end: stint.lap_end.unwrap_or(lap_start).max(lap_start),
            color: compound_color(compound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stint(number: u32, compound: Option<&str>, laps: (Option<u32>, Option<u32>)) -> Stint {
        Stint {
            stint_number: Some(number),
            compound: compound.map(str::to_string),
            lap_start: laps.0,
            lap_end: laps.1,
            tyre_age_at_start: Some(0),
            session_key: Some(1),
            driver_number: Some(1),
        }
    }

    #[test]
    fn unrecognized_compounds_use_the_fallback_color() {
        let segment = StintSegment::new("Race", &stint(2, Some("TEST_UNKNOWN"), (Some(20), Some(40))));
        assert_eq!(segment.compound, "UNKNOWN");
        assert_eq!(segment.color, "#808080");
        assert_eq!(segment.session, "Race");

        let missing = StintSegment::new("Race", &stint(3, None, (Some(41), None)));
        assert_eq!(missing.compound, "UNKNOWN");
        assert_eq!(missing.lap_end, 41);
    }

    #[test]
    fn legend_lists_every_compound() {
        let chart = StintChart::from_sessions(&[]);
        let names: Vec<&str> = chart.legend.iter().map(|l| l.compound).collect();
        assert_eq!(names, vec!["SOFT", "MEDIUM", "HARD", "INTERMEDIATE", "WET", "UNKNOWN"]);
        assert!(chart.series.is_empty());
    }
}
