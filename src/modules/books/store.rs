//! Thread-safe in-memory book store.
//!
//! Reads share a `parking_lot::RwLock`, writes take it exclusively. Guards are
//! held only while the underlying `Vec` is touched; sorting and paging run on
//! an owned snapshot after the lock is released.

use std::cmp::Ordering;

use parking_lot::RwLock;
use uuid::Uuid;

use super::models::{Book, PagedResult};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

const SAMPLE_BOOKS: [(&str, &str, bool); 3] = [
    ("The Pragmatic Programmer", "Andy", true),
    ("Clean Code", "Robert", false),
    ("Design Patterns", "Erich", true),
];

#[derive(Debug)]
pub struct BookStore {
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    /// Store seeded with the three sample books.
    pub fn new() -> Self {
        let store = Self::empty();
        for (title, owner, availability) in SAMPLE_BOOKS {
            store.add(title, owner, availability);
        }
        store
    }

    pub fn empty() -> Self {
        Self {
            books: RwLock::new(Vec::new()),
        }
    }

    /// Append a new book with a freshly generated id. Inputs are stored as
    /// given; trimming and validation belong to the caller.
    pub fn add(
        &self,
        title: impl Into<String>,
        owner: impl Into<String>,
        availability: bool,
    ) -> Book {
        let book = Book {
            id: Uuid::now_v7(),
            title: title.into(),
            owner: owner.into(),
            availability,
        };
        self.books.write().push(book.clone());
        book
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<Book> {
        self.books.read().iter().find(|b| b.id == id).cloned()
    }

    /// Remove the book with `id`. Returns `false` when nothing was removed.
    pub fn delete(&self, id: Uuid) -> bool {
        let mut books = self.books.write();
        match books.iter().position(|b| b.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring match on title or owner, ordered by title
    /// then owner. `None` and blank queries match every book.
    pub fn search(&self, query: Option<&str>) -> Vec<Book> {
        let needle = query.unwrap_or_default().trim().to_lowercase();

        let mut matches: Vec<Book> = self
            .books
            .read()
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle) || b.owner.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        matches.sort_by(by_title_then_owner);
        matches
    }

    /// One page of the catalog ordered by title then owner.
    ///
    /// `page <= 0` becomes 1; `page_size <= 0` becomes 10 and anything above
    /// 100 is capped at 100.
    pub fn get_page(&self, page: i64, page_size: i64) -> PagedResult<Book> {
        let page = normalize_page(page);
        let page_size = normalize_page_size(page_size);

        let mut books = self.books.read().clone();
        let total_count = books.len();
        books.sort_by(by_title_then_owner);

        let skip = (page - 1).saturating_mul(page_size);
        let items = books.into_iter().skip(skip).take(page_size).collect();

        PagedResult {
            items,
            page,
            page_size,
            total_count,
            total_pages: total_count.div_ceil(page_size),
        }
    }

    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

fn by_title_then_owner(a: &Book, b: &Book) -> Ordering {
    compare_text(&a.title, &b.title).then_with(|| compare_text(&a.owner, &b.owner))
}

/// Alphabetical ignoring case; values equal up to case fall back to ordinal
/// order so the result never depends on insertion order.
fn compare_text(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a).cmp(&folded(b)).then_with(|| a.cmp(b))
}

fn normalize_page(page: i64) -> usize {
    if page <= 0 {
        1
    } else {
        usize::try_from(page).unwrap_or(usize::MAX)
    }
}

fn normalize_page_size(page_size: i64) -> usize {
    if page_size <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        usize::try_from(page_size).map_or(MAX_PAGE_SIZE, |size| size.min(MAX_PAGE_SIZE))
    }
}
