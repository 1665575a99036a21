use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::live::{driver_stats, drivers, race_stats, races, team_stats, teams},
    utils::state::AppState,
};

pub fn live_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{season}/races", get(races))
        .route("/{season}/races/{race_id}", get(race_stats))
        .route("/{season}/drivers", get(drivers))
        .route("/{season}/drivers/{driver_id}", get(driver_stats))
        .route("/{season}/teams", get(teams))
        .route("/{season}/teams/{team_id}", get(team_stats))
}
