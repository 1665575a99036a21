use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::models::{
    error::{Error, Result},
    race::{
        CareerStats, ConstructorStandingRow, DriverStandingRow, DriverSummary, FilteredStats,
        LastRace, ResultFilter, TeamSummary,
    },
};
use crate::utils::state::AppState;

fn limit_param(params: &HashMap<String, String>) -> Option<u32> {
    params.get("limit").and_then(|l| l.parse::<u32>().ok())
}

pub async fn seasons(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.historical.seasons().await)
}

pub async fn season_drivers(
    State(state): State<Arc<AppState>>,
    Path(season): Path<String>,
) -> Json<Vec<DriverSummary>> {
    Json(state.historical.drivers_for_season(&season).await)
}

pub async fn season_constructors(
    State(state): State<Arc<AppState>>,
    Path(season): Path<String>,
) -> Json<Vec<TeamSummary>> {
    Json(state.historical.teams_for_season(&season).await)
}

pub async fn filtered_stats(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ResultFilter>,
) -> Result<Json<FilteredStats>> {
    state
        .historical
        .filtered_stats(&filter)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound("No results match the filter".to_string()))
}

pub async fn current_driver_standings(State(state): State<Arc<AppState>>) -> Json<Vec<DriverStandingRow>> {
    Json(state.historical.current_driver_standings().await)
}

pub async fn driver_standings(
    State(state): State<Arc<AppState>>,
    Path(season): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<DriverStandingRow>> {
    Json(state.historical.driver_standings(&season, limit_param(&params)).await)
}

pub async fn constructor_standings(
    State(state): State<Arc<AppState>>,
    Path(season): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<ConstructorStandingRow>> {
    Json(state.historical.constructor_standings(&season, limit_param(&params)).await)
}

pub async fn driver_career(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
) -> Result<Json<CareerStats>> {
    state
        .historical
        .driver_career_stats(&driver_id)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("No career data for {driver_id}")))
}

pub async fn last_race(
    State(state): State<Arc<AppState>>,
    Path(season): Path<String>,
) -> Result<Json<LastRace>> {
    state
        .historical
        .last_race_results(&season)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("No race results for {season}")))
}
