//! # JSON Document Store
//!
//! The whole state lives in one JSON object:
//!
//! ```json
//! {
//!   "territory_clients_v2": [ ... ],
//!   "territory_events_v2": [ ... ]
//! }
//! ```
//!
//! Missing keys and a missing file both read as empty collections. Unknown
//! keys are ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use territory_core::{Client, Event};
use territory_engine::{ConflictRule, TerritoryBook};

use crate::error::StoreError;

/// Key holding the client collection.
pub const CLIENTS_KEY: &str = "territory_clients_v2";

/// Key holding the event collection.
pub const EVENTS_KEY: &str = "territory_events_v2";

/// The stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// All clients.
    #[serde(rename = "territory_clients_v2", default)]
    pub clients: Vec<Client>,
    /// All events.
    #[serde(rename = "territory_events_v2", default)]
    pub events: Vec<Event>,
}

#[derive(Serialize)]
struct StoreDocumentRef<'a> {
    #[serde(rename = "territory_clients_v2")]
    clients: &'a [Client],
    #[serde(rename = "territory_events_v2")]
    events: &'a [Event],
}

/// A [`TerritoryBook`] persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw document. A missing file is an empty document.
    pub fn read_document(&self) -> Result<StoreDocument, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "store file absent; starting empty");
            return Ok(StoreDocument::default());
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::json(&self.path, e))
    }

    /// Load the book. Stored conflict sets are ignored and recomputed under
    /// `rule`.
    pub fn load(&self, rule: ConflictRule) -> Result<TerritoryBook, StoreError> {
        let document = self.read_document()?;
        tracing::debug!(
            path = %self.path.display(),
            clients = document.clients.len(),
            events = document.events.len(),
            "loaded store"
        );
        Ok(TerritoryBook::from_parts(
            document.clients,
            document.events,
            rule,
        ))
    }

    /// Write the book, replacing the file atomically. Parent directories are
    /// created as needed.
    pub fn save(&self, book: &TerritoryBook) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let document = StoreDocumentRef {
            clients: book.clients(),
            events: book.events(),
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| StoreError::json(&self.path, e))?;

        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            clients = book.clients().len(),
            events = book.events().len(),
            "saved store"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
