use sqlx::SqlitePool;

use crate::models::{BookListing, BookRow, RatingBookRow};

/// Every distinct user id seen in the ratings table.
pub async fn distinct_user_ids(pool: &SqlitePool) -> sqlx::Result<Vec<i64>> {
    sqlx::query_scalar("SELECT DISTINCT userID FROM user_ratings_books_info ORDER BY userID")
        .fetch_all(pool)
        .await
}

/// Every distinct (title, author) pair, for the search page listing.
pub async fn distinct_books(pool: &SqlitePool) -> sqlx::Result<Vec<BookListing>> {
    sqlx::query_as(
        "SELECT DISTINCT title, author FROM user_ratings_books_info \
         WHERE title IS NOT NULL AND author IS NOT NULL ORDER BY title, author",
    )
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring title search, capped at one hit.
pub async fn search_title(pool: &SqlitePool, query: &str) -> sqlx::Result<Vec<BookRow>> {
    let pattern = format!("%{query}%");
    sqlx::query_as(
        "SELECT title, author, ISBN AS isbn, imageUrlM AS image_url \
         FROM user_ratings_books_info WHERE title LIKE ?1 LIMIT 1",
    )
    .bind(pattern)
    .fetch_all(pool)
    .await
}

/// Inserts one rating row. Descriptive columns stay empty on these rows.
pub async fn insert_rating(
    pool: &SqlitePool,
    user_id: i64,
    isbn: &str,
    rating: i64,
) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO user_ratings_books_info (userID, ISBN, bookRating) VALUES (?1, ?2, ?3)")
        .bind(user_id)
        .bind(isbn)
        .bind(rating)
        .execute(pool)
        .await?;
    Ok(())
}

/// Deletes every rating row belonging to a user; returns the rows removed.
pub async fn delete_user_ratings(pool: &SqlitePool, user_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM user_ratings_books_info WHERE userID = ?1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// The full ratings table, metadata included, for model training.
pub async fn all_ratings(pool: &SqlitePool) -> sqlx::Result<Vec<RatingBookRow>> {
    sqlx::query_as(
        "SELECT userID AS user_id, ISBN AS isbn, bookRating AS rating, \
                title, author, imageUrlM AS image_url \
         FROM user_ratings_books_info",
    )
    .fetch_all(pool)
    .await
}
