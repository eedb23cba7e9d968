pub mod catalog;
pub mod error;
pub mod filter;
pub mod models;
pub mod routes;
pub mod seed;
pub mod source;
pub mod store;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;
use shelf_kernel::{settings::Settings, InitCtx, Module};

use catalog::Catalog;
use store::CatalogStore;

/// Books module: owns the catalog and exposes it over HTTP
pub struct BooksModule {
    catalog: Catalog,
    load_on_start: bool,
}

impl BooksModule {
    pub fn new(catalog: Catalog, load_on_start: bool) -> Self {
        Self {
            catalog,
            load_on_start,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            source = %ctx.settings.catalog.source,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if self.load_on_start {
            // Settles in the background; the HTTP server does not wait for it.
            drop(self.catalog.start_load().await);
        }
        tracing::info!(
            module = self.name(),
            load_on_start = self.load_on_start,
            "books module started"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Build the books module from settings: seeded store plus configured source
pub fn create_module(settings: &Settings) -> anyhow::Result<Arc<dyn Module>> {
    let source = source::from_settings(&settings.catalog)?;
    let store = if settings.catalog.seed {
        CatalogStore::with_items(seed::seed_records())
    } else {
        CatalogStore::new()
    };

    Ok(Arc::new(BooksModule::new(
        Catalog::new(store, source),
        settings.catalog.load_on_start,
    )))
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn status_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/LoadStatus" }
            }
        }
    })
}

fn id_parameter() -> serde_json::Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    })
}

fn openapi_fragment() -> serde_json::Value {
    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books, optionally filtered by id, name or author",
                    "tags": ["Books"],
                    "parameters": [{
                        "name": "q",
                        "in": "query",
                        "required": false,
                        "schema": { "type": "string" }
                    }],
                    "responses": {
                        "200": {
                            "description": "Matching books in catalog order",
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
                },
                "post": {
                    "summary": "Add a book from a draft",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/BookDraft" }
                            }
                        }
                    },
                    "responses": {
                        "201": book_response("Created book"),
                        "400": error_response("Body is not a JSON draft"),
                        "422": error_response("Draft rejected")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get one book",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": book_response("The book"),
                        "404": error_response("Book not found")
                    }
                }
            },
            "/{id}/toggle-read": {
                "post": {
                    "summary": "Flip a book's read flag",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": book_response("Updated book"),
                        "404": error_response("Book not found")
                    }
                }
            },
            "/load": {
                "post": {
                    "summary": "Reload the catalog from its source",
                    "tags": ["Books"],
                    "responses": {
                        "202": status_response("Load started")
                    }
                }
            },
            "/status": {
                "get": {
                    "summary": "Catalog load status",
                    "tags": ["Books"],
                    "responses": {
                        "200": status_response("Current load status")
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
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "Unique identifier for the book" },
                        "name": { "type": "string", "description": "Title of the book" },
                        "author": { "type": "string", "description": "Author of the book" },
                        "imgUrl": { "type": "string", "description": "Cover image URL" },
                        "genre": { "type": "string" },
                        "rating": { "type": "number", "minimum": 0, "maximum": 5 },
                        "description": { "type": "string" },
                        "isRead": { "type": "boolean" }
                    },
                    "required": ["id", "name", "author", "imgUrl", "genre", "rating", "description", "isRead"]
                },
                "BookDraft": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "author": { "type": "string" },
                        "genre": { "type": "string" },
                        "rating": { "type": "string", "description": "Number between 0 and 5, as text" },
                        "description": { "type": "string" }
                    }
                },
                "LoadStatus": {
                    "type": "object",
                    "properties": {
                        "loadStatus": {
                            "type": "string",
                            "enum": ["idle", "loading", "succeeded", "failed"]
                        },
                        "loadError": { "type": ["string", "null"] },
                        "count": { "type": "integer" }
                    },
                    "required": ["loadStatus", "count"]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::catalog::testing::{record, ScriptedSource};
    use super::store::LoadStatus;
    use super::*;

    #[tokio::test]
    async fn start_triggers_load_when_enabled() {
        let source = Arc::new(ScriptedSource::new().respond(Ok(vec![record("x")])));
        let module = BooksModule::new(Catalog::new(CatalogStore::new(), source.clone()), true);
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        module.start(&ctx).await.unwrap();
        while module.catalog().snapshot().await.load_status == LoadStatus::Loading {
            tokio::task::yield_now().await;
        }

        let state = module.catalog().snapshot().await;
        assert_eq!(state.load_status, LoadStatus::Succeeded);
        assert_eq!(state.items[0].id, "x");
    }

    #[tokio::test]
    async fn start_leaves_store_idle_when_disabled() {
        let module = BooksModule::new(
            Catalog::new(CatalogStore::new(), Arc::new(ScriptedSource::new())),
            false,
        );
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        module.start(&ctx).await.unwrap();
        assert_eq!(module.catalog().snapshot().await.load_status, LoadStatus::Idle);
    }

    #[test]
    fn create_module_from_default_settings() {
        let mut settings = Settings::default();
        settings.catalog.load_on_start = false;

        let module = create_module(&settings).unwrap();
        assert_eq!(module.name(), "books");
    }

    #[test]
    fn openapi_documents_every_route() {
        let fragment = openapi_fragment();
        for path in ["/", "/{id}", "/{id}/toggle-read", "/load", "/status", "/health"] {
            assert!(fragment["paths"][path].is_object(), "{path} undocumented");
        }
        assert!(fragment["components"]["schemas"]["Book"].is_object());
    }
}
