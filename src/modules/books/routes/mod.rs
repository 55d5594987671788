use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use libris_http::{AppError, AppResult};
use uuid::Uuid;

use super::models::{Book, CreateBookRequest, ListQuery, PagedResult, SearchQuery};
use super::store::BookStore;
use super::MODULE_NAME;

/// HTTP routes for the books module, relative to its mount point.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/search", get(search_books))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book).delete(delete_book))
        .with_state(store)
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

/// `GET /?page&pageSize`
async fn list_books(
    State(store): State<Arc<BookStore>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<PagedResult<Book>>> {
    let Query(query) = query.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    // Normalization happens once, inside the store.
    let page = store.get_page(query.page.unwrap_or(1), query.page_size.unwrap_or(10));
    tracing::debug!(
        page = page.page,
        page_size = page.page_size,
        total = page.total_count,
        "listed books"
    );
    Ok(Json(page))
}

/// `GET /search?q=`
async fn search_books(
    State(store): State<Arc<BookStore>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Book>> {
    let books = store.search(query.q.as_deref());
    tracing::debug!(query = ?query.q, hits = books.len(), "searched books");
    Json(books)
}

/// `POST /`
async fn create_book(
    State(store): State<Arc<BookStore>>,
    body: Result<Json<CreateBookRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = body.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let new_book = request.validate()?;

    let book = store.add(new_book.title, new_book.owner, new_book.availability);
    tracing::info!(book_id = %book.id, title = %book.title, "book created");

    let location = format!("/api/{}/{}", MODULE_NAME, book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// `GET /{id}`
async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = parse_id(&id).and_then(|id| store.get_by_id(id));
    book.map(Json)
        .ok_or_else(|| AppError::not_found(format!("book '{id}' not found")))
}

/// `DELETE /{id}`
async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    match parse_id(&id) {
        Some(book_id) if store.delete(book_id) => {
            tracing::info!(book_id = %book_id, "book deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        _ => Err(AppError::not_found(format!("book '{id}' not found"))),
    }
}

/// Ids that are not UUIDs cannot name a book, so they resolve to 404 like
/// any other unknown id.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
