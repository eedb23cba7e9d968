//! HTTP surface of the books module, mounted under `/api/books`.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shelf_http::error::AppError;

use super::catalog::Catalog;
use super::error::DraftError;
use super::models::{BookDraft, BookRecord};
use super::store::LoadStatus;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Matched against id, name and author
    #[serde(default)]
    pub q: String,
}

/// Load lifecycle as seen by clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub load_status: LoadStatus,
    pub load_error: Option<String>,
    pub count: usize,
}

pub fn router(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route("/status", get(load_status))
        .route("/load", post(trigger_load))
        .route("/{id}", get(get_book))
        .route("/{id}/toggle-read", post(toggle_read))
        .with_state(catalog)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(
    State(catalog): State<Catalog>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<BookRecord>> {
    Json(catalog.filter(&query.q).await)
}

async fn get_book(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<BookRecord>, AppError> {
    catalog
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book '{id}' not found")))
}

async fn create_book(
    State(catalog): State<Catalog>,
    payload: Result<Json<BookDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<BookRecord>), AppError> {
    let Json(draft) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let record = catalog.add(&draft).await.map_err(draft_rejected)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn toggle_read(
    State(catalog): State<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<BookRecord>, AppError> {
    catalog
        .toggle_read(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book '{id}' not found")))
}

/// Start a load and answer right away; poll `/status` for the result.
async fn trigger_load(State(catalog): State<Catalog>) -> (StatusCode, Json<StatusView>) {
    // Detached; the result lands in the store.
    drop(catalog.start_load().await);
    (StatusCode::ACCEPTED, Json(status_view(&catalog).await))
}

async fn load_status(State(catalog): State<Catalog>) -> Json<StatusView> {
    Json(status_view(&catalog).await)
}

async fn status_view(catalog: &Catalog) -> StatusView {
    let state = catalog.snapshot().await;
    StatusView {
        load_status: state.load_status,
        load_error: state.load_error,
        count: state.items.len(),
    }
}

fn draft_rejected(err: DraftError) -> AppError {
    AppError::validation(
        vec![json!({ "field": err.field(), "error": err.to_string() })],
        "book draft rejected",
    )
}
