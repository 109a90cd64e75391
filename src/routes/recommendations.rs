use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::RatingBookRow;
use crate::services::recommender::Rating;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub isbn: String,
    pub estimated_rating: f64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
}

/// Handler for the recommendations endpoint
///
/// Loads the full ratings table, fits a fresh model, and returns the top
/// scored unseen books for the user, with metadata resolved from the table.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let user_id = request
        .user_id
        .filter(|u| *u != 0)
        .ok_or_else(|| AppError::InvalidInput("User ID is required".to_string()))?;

    let rows = db::books::all_ratings(&state.books).await?;

    // The fit is CPU-bound; run it on a blocking thread while the request
    // waits for it.
    let recommender = state.recommender.clone();
    let ratings: Vec<Rating> = rows
        .iter()
        .map(|r| Rating {
            user: r.user_id,
            item: r.isbn.clone(),
            value: r.rating as f64,
        })
        .collect();
    let scored = tokio::task::spawn_blocking(move || recommender.recommend(&ratings, user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let results = scored
        .into_iter()
        .map(|s| {
            let meta = book_metadata(&rows, &s.item);
            RecommendationResponse {
                isbn: s.item,
                estimated_rating: s.score,
                title: meta.and_then(|m| m.title.clone()),
                author: meta.and_then(|m| m.author.clone()),
                image_url: meta.and_then(|m| m.image_url.clone()),
            }
        })
        .collect();

    Ok(Json(results))
}

/// First row carrying metadata for the ISBN, falling back to any row.
fn book_metadata<'a>(rows: &'a [RatingBookRow], isbn: &str) -> Option<&'a RatingBookRow> {
    rows.iter()
        .find(|r| r.isbn == isbn && r.title.is_some())
        .or_else(|| rows.iter().find(|r| r.isbn == isbn))
}
