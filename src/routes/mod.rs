use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

pub mod books;
pub mod flash;
pub mod maps;
pub mod recommendations;

use crate::state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    Router::new()
        .route("/health", get(health_check))
        // Search page
        .route("/", get(books::index).post(books::index_search))
        .route("/search", post(books::search))
        // Ratings
        .route("/add_book_rating", post(books::add_book_rating))
        .route("/reset_user", post(books::reset_user))
        // Recommendations
        .route("/get_recommendations", post(recommendations::get_recommendations))
        // Maps
        .route("/map", get(maps::cluster_map))
        .route(
            "/optimized_routes_from_cluster",
            get(maps::optimized_routes_from_cluster),
        )
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
