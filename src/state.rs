use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::recommender::{Recommender, SvdRecommender};
use crate::services::road_network::RoadNetwork;

/// Shared application state
///
/// Initialized once at startup and passed to every handler through the
/// router; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    pub books: SqlitePool,
    pub transit: SqlitePool,
    pub road_network: Arc<RoadNetwork>,
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    pub fn new(books: SqlitePool, transit: SqlitePool, road_network: RoadNetwork) -> Self {
        Self {
            books,
            transit,
            road_network: Arc::new(road_network),
            recommender: Arc::new(SvdRecommender::default()),
        }
    }

    /// Swaps the recommender implementation, for test doubles.
    pub fn with_recommender(mut self, recommender: Arc<dyn Recommender>) -> Self {
        self.recommender = recommender;
        self
    }
}
