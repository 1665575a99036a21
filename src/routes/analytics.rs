use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::analytics::{constructor_metric, constructor_stats, driver_stats, drivers, races},
    utils::state::AppState,
};

pub fn analytics_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/races", get(races))
        .route("/drivers", get(drivers))
        .route("/drivers/{id}", get(driver_stats))
        .route("/constructors/{id}", get(constructor_stats))
        .route("/constructors/{id}/{metric}", get(constructor_metric))
}
