use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::historical::{
        constructor_standings, current_driver_standings, driver_career, driver_standings,
        filtered_stats, last_race, season_constructors, season_drivers, seasons,
    },
    utils::state::AppState,
};

pub fn historical_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seasons", get(seasons))
        .route("/stats", get(filtered_stats))
        .route("/standings/current", get(current_driver_standings))
        .route("/drivers/{driver_id}/career", get(driver_career))
        .route("/{season}/drivers", get(season_drivers))
        .route("/{season}/constructors", get(season_constructors))
        .route("/{season}/driver_standings", get(driver_standings))
        .route("/{season}/constructor_standings", get(constructor_standings))
        .route("/{season}/last_race", get(last_race))
}
