use libris_http::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

/// Longest title or owner accepted on create, in UTF-16 code units of the
/// value as sent (surrounding whitespace included).
pub const MAX_FIELD_CHARS: usize = 200;

/// A catalogued book. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-generated identifier
    pub id: Uuid,
    /// Title of the book
    pub title: String,
    /// Person the book belongs to
    pub owner: String,
    /// Whether the book can currently be borrowed
    pub availability: bool,
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    /// Normalized 1-based page number actually used
    pub page: usize,
    /// Normalized page size actually used
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Request body for `POST /api/books`.
///
/// Missing strings deserialize as empty so they are reported as validation
/// errors rather than JSON shape errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub availability: bool,
}

/// Validated, trimmed input for `BookStore::add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub owner: String,
    pub availability: bool,
}

impl CreateBookRequest {
    /// Reject blank or oversized `title` and `owner`, then trim them.
    pub fn validate(self) -> AppResult<NewBook> {
        let details: Vec<serde_json::Value> = [("title", &self.title), ("owner", &self.owner)]
            .into_iter()
            .filter_map(|(field, value)| {
                field_error(value).map(|error| json!({ "field": field, "error": error }))
            })
            .collect();

        if !details.is_empty() {
            return Err(AppError::validation(
                details,
                "title and owner are required",
            ));
        }

        Ok(NewBook {
            title: self.title.trim().to_string(),
            owner: self.owner.trim().to_string(),
            availability: self.availability,
        })
    }
}

fn field_error(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        Some("required".to_string())
    } else if raw.encode_utf16().count() > MAX_FIELD_CHARS {
        Some(format!("must be at most {MAX_FIELD_CHARS} characters"))
    } else {
        None
    }
}

/// Query string for `GET /api/books`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Query string for `GET /api/books/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}
