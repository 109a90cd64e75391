use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::{BookListing, BookRow};
use crate::routes::flash;
use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("index_template.html");

/// Ratings entered through the search page all belong to this user.
const RESET_USER_ID: i64 = 1;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddRatingRequest {
    #[serde(default)]
    pub books: Option<Vec<RatingItem>>,
}

#[derive(Debug, Deserialize)]
pub struct RatingItem {
    #[serde(rename = "userID", default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub rating: Option<i64>,
}

impl RatingItem {
    /// All three fields must be present; zero and empty values count as
    /// missing.
    fn validated(&self) -> Option<(i64, &str, i64)> {
        let user_id = self.user_id.filter(|u| *u != 0)?;
        let isbn = self.isbn.as_deref().filter(|s| !s.is_empty())?;
        let rating = self.rating.filter(|r| *r != 0)?;
        Some((user_id, isbn, rating))
    }
}

// Handlers

/// Search page with user and book listings
pub async fn index(State(state): State<AppState>, session: Session) -> AppResult<Html<String>> {
    let users = db::books::distinct_user_ids(&state.books).await?;
    let books = db::books::distinct_books(&state.books).await?;
    let message = flash::take(&session).await;
    Ok(render_index(&users, &books, &[], message.as_deref()))
}

/// Form search on the page itself
pub async fn index_search(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SearchForm>,
) -> AppResult<Html<String>> {
    let users = db::books::distinct_user_ids(&state.books).await?;
    let books = db::books::distinct_books(&state.books).await?;

    match form.query.as_deref().filter(|q| !q.is_empty()) {
        Some(query) => {
            let results = db::books::search_title(&state.books, query).await?;
            Ok(render_index(&users, &books, &results, None))
        }
        None => {
            flash::set(&session, "A search string is required").await?;
            let message = flash::take(&session).await;
            Ok(render_index(&users, &books, &[], message.as_deref()))
        }
    }
}

/// Search endpoint for the live search bar; JSON instead of HTML
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> AppResult<Json<Vec<BookRow>>> {
    let Some(query) = form.query.as_deref().filter(|q| !q.is_empty()) else {
        return Ok(Json(Vec::new()));
    };
    let books = db::books::search_title(&state.books, query).await?;
    Ok(Json(books))
}

/// Adds a batch of book ratings
///
/// Items are processed in order; the first invalid item aborts the batch
/// with a 400, leaving rows inserted before it in place.
pub async fn add_book_rating(
    State(state): State<AppState>,
    Json(request): Json<AddRatingRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let items = match request.books {
        Some(items) if !items.is_empty() => items,
        _ => return Err(AppError::InvalidInput("No books provided".to_string())),
    };

    for item in &items {
        let Some((user_id, isbn, rating)) = item.validated() else {
            return Err(AppError::InvalidInput("All fields are required".to_string()));
        };
        db::books::insert_rating(&state.books, user_id, isbn, rating).await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "All book ratings added successfully" })),
    ))
}

/// Removes every rating belonging to the page's user
pub async fn reset_user(State(state): State<AppState>) -> AppResult<Json<Value>> {
    db::books::delete_user_ratings(&state.books, RESET_USER_ID).await?;
    Ok(Json(
        json!({ "message": format!("User {RESET_USER_ID} reset successfully") }),
    ))
}

// Page rendering

fn render_index(
    users: &[i64],
    books: &[BookListing],
    results: &[BookRow],
    message: Option<&str>,
) -> Html<String> {
    let flash_html = message
        .map(|m| format!("<p class=\"flash\">{}</p>", escape_html(m)))
        .unwrap_or_default();

    let user_options: String = users
        .iter()
        .map(|u| format!("      <option value=\"{u}\">{u}</option>\n"))
        .collect();

    let book_options: String = books
        .iter()
        .map(|b| {
            format!(
                "      <option value=\"{}\">{} by {}</option>\n",
                escape_html(&b.title),
                escape_html(&b.title),
                escape_html(&b.author),
            )
        })
        .collect();

    let result_rows: String = results
        .iter()
        .map(|b| {
            format!(
                "      <li data-isbn=\"{}\"><strong>{}</strong> by {}{}</li>\n",
                escape_html(&b.isbn),
                escape_html(b.title.as_deref().unwrap_or("Unknown title")),
                escape_html(b.author.as_deref().unwrap_or("unknown author")),
                b.image_url
                    .as_deref()
                    .map(|url| format!(" <img src=\"{}\" alt=\"cover\">", escape_html(url)))
                    .unwrap_or_default(),
            )
        })
        .collect();

    Html(
        INDEX_TEMPLATE
            .replace("{{FLASH}}", &flash_html)
            .replace("{{USER_OPTIONS}}", &user_options)
            .replace("{{BOOK_OPTIONS}}", &book_options)
            .replace("{{RESULTS}}", &result_rows),
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
