//! Where `load()` gets the catalog from.

use anyhow::Context;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use shelf_kernel::settings::CatalogSettings;

use super::error::LoadError;
use super::models::{BookRecord, MAX_RATING, MIN_RATING};

/// A place the full catalog can be fetched from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Fetch and decode the whole catalog.
    async fn fetch(&self) -> Result<Vec<BookRecord>, LoadError>;
}

/// GET a JSON array of records from a fixed URL.
pub struct HttpSource {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let url = reqwest::Url::parse(url).with_context(|| format!("invalid catalog url '{url}'"))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "failed to build catalog HTTP client")?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<BookRecord>, LoadError> {
        tracing::debug!(url = %self.url, "requesting catalog");

        let response = self
            .client
            .get(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| LoadError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| LoadError::Transport(err.to_string()))?;
        decode_payload(&body)
    }
}

/// Read a JSON array of records from a local file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<BookRecord>, LoadError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|err| LoadError::Io(format!("{}: {}", self.path.display(), err)))?;
        decode_payload(&body)
    }
}

/// Pick the source for a configured location: URLs go over HTTP, anything else is a file.
pub fn from_settings(settings: &CatalogSettings) -> anyhow::Result<Arc<dyn CatalogSource>> {
    let location = settings.source.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        let timeout = Duration::from_millis(settings.fetch_timeout_ms);
        Ok(Arc::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Arc::new(FileSource::new(location)))
    }
}

/// Decode a catalog payload and reject records that would break store invariants.
pub fn decode_payload(body: &[u8]) -> Result<Vec<BookRecord>, LoadError> {
    let records: Vec<BookRecord> =
        serde_json::from_slice(body).map_err(|err| LoadError::Decode(err.to_string()))?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if record.id.is_empty() {
            return Err(LoadError::InvalidPayload("record with empty id".to_string()));
        }
        if !seen.insert(record.id.as_str()) {
            return Err(LoadError::InvalidPayload(format!(
                "duplicate id '{}'",
                record.id
            )));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&record.rating) {
            return Err(LoadError::InvalidPayload(format!(
                "record '{}' has rating {} outside 0..=5",
                record.id, record.rating
            )));
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use serde_json::json;

    fn payload(ids: &[&str]) -> serde_json::Value {
        let records: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("Book {id}"),
                    "author": "Author",
                    "imgUrl": "https://covers.test/book.png",
                    "genre": "Genre",
                    "rating": 4,
                    "description": "Description",
                    "isRead": false
                })
            })
            .collect();
        json!(records)
    }

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{address}")
    }

    #[test]
    fn decodes_wire_records() {
        let body = serde_json::to_vec(&payload(&["a", "b"])).unwrap();
        let records = decode_payload(&body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[1].image_url, "https://covers.test/book.png");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            decode_payload(b"{\"not\":\"an array\"}"),
            Err(LoadError::Decode(_))
        ));
        assert!(matches!(decode_payload(b"<html>"), Err(LoadError::Decode(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let body = serde_json::to_vec(&payload(&["a", "a"])).unwrap();
        let err = decode_payload(&body).unwrap_err();
        assert_eq!(err, LoadError::InvalidPayload("duplicate id 'a'".to_string()));
    }

    #[test]
    fn rejects_empty_id() {
        let body = serde_json::to_vec(&payload(&["a", ""])).unwrap();
        let err = decode_payload(&body).unwrap_err();
        assert_eq!(
            err,
            LoadError::InvalidPayload("record with empty id".to_string())
        );
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let mut value = payload(&["a"]);
        value[0]["rating"] = json!(9.5);
        let body = serde_json::to_vec(&value).unwrap();
        assert!(matches!(
            decode_payload(&body),
            Err(LoadError::InvalidPayload(_))
        ));
    }

    #[test]
    fn settings_choose_source_kind() {
        let mut settings = CatalogSettings::default();
        assert_eq!(from_settings(&settings).unwrap().describe(), "public/books.json");

        settings.source = "http://127.0.0.1:5173/books.json".to_string();
        assert_eq!(
            from_settings(&settings).unwrap().describe(),
            "http://127.0.0.1:5173/books.json"
        );
    }

    #[tokio::test]
    async fn file_source_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        tokio::fs::write(&path, serde_json::to_vec(&payload(&["x"])).unwrap())
            .await
            .unwrap();

        let records = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(records[0].id, "x");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = FileSource::new("/definitely/not/here/books.json")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.to_string().starts_with("failed to read books"));
    }

    #[tokio::test]
    async fn http_source_fetches_json() {
        let body = payload(&["b", "c"]);
        let base = serve(Router::new().route(
            "/books.json",
            get(move || {
                let body = body.clone();
                async move { axum::Json(body) }
            }),
        ))
        .await;

        let source = HttpSource::new(&format!("{base}/books.json"), Duration::from_secs(5)).unwrap();
        let records = source.fetch().await.unwrap();
        let ids: Vec<_> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn http_source_reports_error_status() {
        let base = serve(Router::new().route(
            "/books.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "nope") }),
        ))
        .await;

        let source = HttpSource::new(&format!("{base}/books.json"), Duration::from_secs(5)).unwrap();
        assert_eq!(
            source.fetch().await.unwrap_err(),
            LoadError::Status { status: 500 }
        );
    }

    #[tokio::test]
    async fn http_source_reports_transport_failure() {
        // Bind then drop, so nothing is listening on the port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let source =
            HttpSource::new(&format!("http://{address}/books.json"), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            source.fetch().await.unwrap_err(),
            LoadError::Transport(_)
        ));
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(HttpSource::new("http://", Duration::from_secs(1)).is_err());
    }
}
