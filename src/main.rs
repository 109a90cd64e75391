use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bokveg_api::config::Config;
use bokveg_api::services::road_network::RoadNetwork;
use bokveg_api::{create_router, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let books = db::create_pool(&config.books_database_url).await?;
    let transit = db::create_pool(&config.transit_database_url).await?;
    let road_network = RoadNetwork::load(Path::new(&config.road_network_path))?;
    info!(nodes = road_network.len(), "road network snapshot loaded");

    let state = AppState::new(books, transit, road_network);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
