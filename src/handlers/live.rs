use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::models::{
    error::{Error, Result},
    session::{DriverEntry, EntrantStats, RaceSession, RaceStats, TeamEntry},
};
use crate::utils::state::AppState;

pub async fn races(State(state): State<Arc<AppState>>, Path(season): Path<i32>) -> Json<Vec<RaceSession>> {
    Json(state.live.races(season).await)
}

pub async fn drivers(State(state): State<Arc<AppState>>, Path(season): Path<i32>) -> Json<Vec<DriverEntry>> {
    Json(state.live.drivers(season).await)
}

pub async fn teams(State(state): State<Arc<AppState>>, Path(season): Path<i32>) -> Json<Vec<TeamEntry>> {
    Json(state.live.teams(season).await)
}

pub async fn driver_stats(
    State(state): State<Arc<AppState>>,
    Path((season, driver_number)): Path<(i32, u32)>,
) -> Result<Json<EntrantStats>> {
    state
        .live
        .driver_stats(driver_number, season)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("No driver #{driver_number} in {season}")))
}

pub async fn team_stats(
    State(state): State<Arc<AppState>>,
    Path((season, team_id)): Path<(i32, i64)>,
) -> Result<Json<EntrantStats>> {
    state
        .live
        .team_stats(team_id, season)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("No results for team {team_id} in {season}")))
}

pub async fn race_stats(
    State(state): State<Arc<AppState>>,
    Path((season, race_id)): Path<(i32, i64)>,
) -> Result<Json<RaceStats>> {
    state
        .live
        .race_stats(race_id, season)
        .await
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("No session {race_id}")))
}
