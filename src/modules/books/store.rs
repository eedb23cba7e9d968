//! The catalog store: authoritative records plus the bulk-load lifecycle.
//!
//! ```text
//!            begin_load            finish_load(Ok)
//!   idle ───────────────▶ loading ─────────────────▶ succeeded
//!     ▲                    │  ▲                         │
//!     │                    │  └──── begin_load ─────────┤
//!     │                    └─────────────────────────▶ failed
//!                              finish_load(Err)
//! ```
//!
//! Every method runs to completion on `&mut self`; the only asynchronous
//! step (the fetch) happens between `begin_load` and `finish_load`, outside
//! the store. Each `begin_load` issues a new [`LoadTicket`]; a result that
//! settles with an older ticket is discarded so the latest load always wins.

use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use super::error::{DraftError, LoadError};
use super::models::{BookDraft, BookRecord};

/// Where the bulk load currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Observable catalog state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    /// Newest-created record first
    pub items: Vec<BookRecord>,
    pub load_status: LoadStatus,
    /// Set only while `load_status` is `Failed`
    pub load_error: Option<String>,
}

/// Identifies one `load()` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What [`CatalogStore::finish_load`] did with a settled result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was applied and the store moved to this status.
    Applied(LoadStatus),
    /// A newer load started after this one; the result was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    state: CatalogState,
    generation: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `items`. Later duplicates of an id are dropped.
    pub fn with_items(items: Vec<BookRecord>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|record| seen.insert(record.id.clone()))
            .collect();

        Self {
            state: CatalogState {
                items,
                ..CatalogState::default()
            },
            generation: 0,
        }
    }

    pub fn items(&self) -> &[BookRecord] {
        &self.state.items
    }

    pub fn load_status(&self) -> LoadStatus {
        self.state.load_status
    }

    pub fn load_error(&self) -> Option<&str> {
        self.state.load_error.as_deref()
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn get(&self, id: &str) -> Option<&BookRecord> {
        self.state.items.iter().find(|record| record.id == id)
    }

    /// Enter `loading` and hand out the ticket the result must be settled with.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state.load_status = LoadStatus::Loading;
        self.state.load_error = None;
        LoadTicket(self.generation)
    }

    /// Apply a settled load. Success replaces `items`; failure keeps them.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<BookRecord>, LoadError>,
    ) -> LoadOutcome {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale catalog load"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(items) => {
                tracing::info!(count = items.len(), "catalog loaded");
                self.state.items = items;
                self.state.load_status = LoadStatus::Succeeded;
                self.state.load_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog load failed");
                self.state.load_status = LoadStatus::Failed;
                self.state.load_error = Some(err.to_string());
            }
        }
        LoadOutcome::Applied(self.state.load_status)
    }

    /// Validate `draft` and prepend the new record. Invalid drafts change nothing.
    pub fn add(&mut self, draft: &BookDraft) -> Result<BookRecord, DraftError> {
        let valid = draft.validate().inspect_err(|err| {
            tracing::debug!(field = err.field(), error = %err, "book draft rejected");
        })?;

        let record = valid.into_record(self.fresh_id());
        tracing::info!(id = %record.id, name = %record.name, "book added");
        self.state.items.insert(0, record.clone());
        Ok(record)
    }

    /// Flip `is_read` on the record with `id`.
    /// Returns the new value, or `None` when no such record exists.
    pub fn toggle_read(&mut self, id: &str) -> Option<bool> {
        let record = self.state.items.iter_mut().find(|record| record.id == id)?;
        record.is_read = !record.is_read;
        tracing::debug!(id, is_read = record.is_read, "read status toggled");
        Some(record.is_read)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
