use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::error::DraftError;
use super::filter::filter_records;
use super::models::{BookDraft, BookRecord};
use super::source::CatalogSource;
use super::store::{CatalogState, CatalogStore, LoadOutcome, LoadTicket};

/// Cloneable handle shared by every consumer of one catalog.
///
/// The lock is only held for the synchronous store operations, never
/// across the fetch, so `add` and `toggle_read` proceed while a load is
/// pending.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<RwLock<CatalogStore>>,
    source: Arc<dyn CatalogSource>,
}

impl Catalog {
    pub fn new(store: CatalogStore, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            source,
        }
    }

    /// Run one load to completion.
    pub async fn load(&self) -> LoadOutcome {
        let ticket = self.store.write().await.begin_load();
        self.settle(ticket).await
    }

    /// Enter `loading` now and finish the fetch on a background task.
    pub async fn start_load(&self) -> JoinHandle<LoadOutcome> {
        let ticket = self.store.write().await.begin_load();
        let catalog = self.clone();
        tokio::spawn(async move { catalog.settle(ticket).await })
    }

    async fn settle(&self, ticket: LoadTicket) -> LoadOutcome {
        tracing::info!(source = %self.source.describe(), "loading catalog");
        let result = self.source.fetch().await;
        self.store.write().await.finish_load(ticket, result)
    }

    pub async fn snapshot(&self) -> CatalogState {
        self.store.read().await.state().clone()
    }

    pub async fn filter(&self, query: &str) -> Vec<BookRecord> {
        let store = self.store.read().await;
        filter_records(store.items(), query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<BookRecord> {
        self.store.read().await.get(id).cloned()
    }

    pub async fn add(&self, draft: &BookDraft) -> Result<BookRecord, DraftError> {
        self.store.write().await.add(draft)
    }

    /// Flip the read flag and return the updated record, if it exists.
    pub async fn toggle_read(&self, id: &str) -> Option<BookRecord> {
        let mut store = self.store.write().await;
        store.toggle_read(id)?;
        store.get(id).cloned()
    }
}
