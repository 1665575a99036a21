use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::analytics::{ConstructorSeasonStats, DriverSeasonStats, RaceSummary};
use crate::models::error::{Error, Result};
use crate::utils::state::AppState;

#[derive(Debug, Serialize)]
pub struct DriverListing {
    pub id: String,
    pub name: String,
}

fn found<T>(value: Option<T>, what: impl FnOnce() -> String) -> Result<T> {
    value.ok_or_else(|| Error::NotFound(what()))
}

pub async fn drivers(State(state): State<Arc<AppState>>) -> Json<Vec<DriverListing>> {
    let analytics = &state.analytics;
    Json(
        analytics
            .all_driver_ids()
            .into_iter()
            .map(|id| DriverListing {
                name: analytics.driver_name(&id),
                id,
            })
            .collect(),
    )
}

pub async fn races(State(state): State<Arc<AppState>>) -> Json<Vec<RaceSummary>> {
    Json(state.analytics.season_races())
}

pub async fn driver_stats(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
) -> Result<Json<DriverSeasonStats>> {
    let season = state.analytics.season().to_string();
    found(state.analytics.driver_season_stats(&driver_id), || {
        format!("No {season} data for driver {driver_id}")
    })
    .map(Json)
}

pub async fn constructor_stats(
    State(state): State<Arc<AppState>>,
    Path(constructor_id): Path<String>,
) -> Result<Json<ConstructorSeasonStats>> {
    let season = state.analytics.season().to_string();
    found(state.analytics.constructor_season_stats(&constructor_id), || {
        format!("No {season} data for constructor {constructor_id}")
    })
    .map(Json)
}

fn json_or_missing<T: Serialize>(value: Option<T>, constructor_id: &str) -> Result<Response> {
    found(value, || format!("No season data for constructor {constructor_id}"))
        .map(|v| Json(v).into_response())
}

pub async fn constructor_metric(
    State(state): State<Arc<AppState>>,
    Path((constructor_id, metric)): Path<(String, String)>,
) -> Result<Response> {
    let analytics = &state.analytics;
    let id = constructor_id.as_str();
    match metric.as_str() {
        "standings" => json_or_missing(analytics.constructor_standings_trend(id), id),
        "progression" => json_or_missing(analytics.constructor_points_progression(id), id),
        "reliability" => json_or_missing(analytics.constructor_reliability_trend(id), id),
        "circuits" => json_or_missing(analytics.constructor_points_by_circuit(id), id),
        "fastest_laps" => json_or_missing(analytics.constructor_fastest_lap_trend(id), id),
        "fastest_lap_count" => json_or_missing(analytics.constructor_fastest_laps_count(id), id),
        "pit_stops" => json_or_missing(analytics.constructor_pit_stop_stats(id), id),
        other => Err(Error::NotFound(format!("Unknown constructor metric: {other}"))),
    }
}
