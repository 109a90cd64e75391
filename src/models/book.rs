use serde::Serialize;
use sqlx::FromRow;

/// A title search hit returned to the client.
///
/// Rows created by the add-rating endpoint carry no descriptive columns, so
/// everything but the ISBN is optional.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookRow {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: String,
    pub image_url: Option<String>,
}

/// A distinct (title, author) pair for the search page listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookListing {
    pub title: String,
    pub author: String,
}

/// One row of the ratings table, with whatever book metadata the row carries.
#[derive(Debug, Clone, FromRow)]
pub struct RatingBookRow {
    pub user_id: i64,
    pub isbn: String,
    pub rating: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
}
