pub mod analytics;
pub mod historical;
pub mod live;

use std::{error::Error, sync::Arc};

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use http::StatusCode;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

pub use analytics::analytics_routes;
pub use historical::historical_routes;
pub use live::live_routes;

use crate::{
    handlers::chat::ask,
    utils::{config::Config, state::AppState},
};

pub fn init_tracing(log_level: &str) {
    let level = match log_level {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let filter = filter::Targets::new()
        .with_target("tower_http::trace::on_response", Level::TRACE)
        .with_target("tower_http::trace::on_request", Level::TRACE)
        .with_target("tower_http::trace::make_span", Level::DEBUG)
        .with_target("axum::rejection", Level::TRACE)
        .with_target(env!("CARGO_PKG_NAME"), level)
        .with_default(Level::INFO);

    let tracing_layer = tracing_subscriber::fmt::layer();

    Registry::default().with(tracing_layer).with(filter).init();
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .nest("/historical", historical_routes())
        .nest("/live", live_routes())
        .nest("/analytics", analytics_routes())
        .route("/chat", post(ask))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn make_app(config: Config) -> Result<Router, Box<dyn Error>> {
    init_tracing(&config.log_level);

    info!("Initializing application...");
    info!(
        "Loading {} season data from {}",
        config.season,
        config.season_data_path.display()
    );
    let state = Arc::new(AppState::init(config)?);
    info!("External clients initialized successfully");

    let app = build_router(state);
    info!("Application initialized successfully");

    Ok(app)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"message": "Hello World"}))).into_response()
}
