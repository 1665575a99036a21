use std::error::Error;

use axum::serve;
use f1_stats::{routes::make_app, utils::config::Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    let config = Config::init();
    let addr = config.bind_addr.clone();

    let app = make_app(config).await?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    serve(listener, app).await?;
    Ok(())
}
