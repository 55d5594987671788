pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use libris_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;
use utoipa::PartialSchema;

use crate::utils;
use models::{Book, CreateBookRequest};
use store::{BookStore, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub const MODULE_NAME: &str = "books";

/// Books module: owns the in-memory catalog and serves it under `/api/books`
pub struct BooksModule {
    store: Arc<BookStore>,
}

impl BooksModule {
    pub fn new(store: Arc<BookStore>) -> Self {
        Self { store }
    }

    /// Build the module with a store seeded according to `settings`
    pub fn from_settings(settings: &CatalogSettings) -> Self {
        let store = if settings.seed_samples {
            BookStore::new()
        } else {
            BookStore::empty()
        };
        Self::new(Arc::new(store))
    }

    pub fn store(&self) -> &Arc<BookStore> {
        &self.store
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            prefix = %utils::log_prefix(self.name()),
            environment = ?ctx.settings.environment,
            seed_samples = ctx.settings.catalog.seed_samples,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let not_found = json!({
            "description": "Book not found",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let bad_request = json!({
            "description": "Invalid request",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "format": "uuid" }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books one page at a time",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "page",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "integer", "default": 1 }
                            },
                            {
                                "name": "pageSize",
                                "in": "query",
                                "required": false,
                                "schema": {
                                    "type": "integer",
                                    "default": DEFAULT_PAGE_SIZE,
                                    "maximum": MAX_PAGE_SIZE
                                }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Page of books ordered by title then owner",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/PagedBooks" }
                                    }
                                }
                            },
                            "400": bad_request.clone()
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBookRequest" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book created",
                                "headers": {
                                    "Location": { "schema": { "type": "string" } }
                                },
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "400": bad_request
                        }
                    }
                },
                "/search": {
                    "get": {
                        "summary": "Search books by title or owner",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "q",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Matching books ordered by title then owner",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [id_param.clone()],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            },
                            "404": not_found.clone()
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": {
                            "204": { "description": "Book deleted" },
                            "404": not_found
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": Book::schema(),
                    "CreateBookRequest": CreateBookRequest::schema(),
                    "PagedBooks": {
                        "type": "object",
                        "properties": {
                            "items": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            },
                            "page": { "type": "integer", "minimum": 1 },
                            "pageSize": { "type": "integer", "minimum": 1, "maximum": MAX_PAGE_SIZE },
                            "totalCount": { "type": "integer", "minimum": 0 },
                            "totalPages": { "type": "integer", "minimum": 0 }
                        },
                        "required": ["items", "page", "pageSize", "totalCount", "totalPages"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.store.len(),
            "books module started"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.store.len(),
            "books module stopped; catalog discarded"
        );
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(settings: &CatalogSettings) -> Arc<dyn Module> {
    Arc::new(BooksModule::from_settings(settings))
}
