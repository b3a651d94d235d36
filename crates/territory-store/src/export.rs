//! Full data export: both collections verbatim plus an export timestamp.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use territory_core::{Client, Event};
use territory_engine::TerritoryBook;

use crate::error::StoreError;

/// Everything in the book at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// All clients.
    pub clients: Vec<Client>,
    /// All events, with their conflict sets.
    pub events: Vec<Event>,
    /// When the export was taken.
    pub export_date: DateTime<Utc>,
}

impl ExportBundle {
    /// Snapshot `book` at `export_date`.
    pub fn capture(book: &TerritoryBook, export_date: DateTime<Utc>) -> Self {
        Self {
            clients: book.clients().to_vec(),
            events: book.events().to_vec(),
            export_date,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the bundle to `path` as pretty JSON.
    pub fn write_to(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json().map_err(|e| StoreError::json(path, e))?;
        std::fs::write(path, json).map_err(|e| StoreError::io(path, e))?;
        tracing::info!(
            path = %path.display(),
            clients = self.clients.len(),
            events = self.events.len(),
            "exported data"
        );
        Ok(())
    }
}

/// `territory-data-YYYY-MM-DD.json`
pub fn default_export_file_name(date: NaiveDate) -> String {
    format!("territory-data-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use territory_core::PostalCode;
    use territory_engine::ClientDraft;

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(default_export_file_name(date), "territory-data-2024-03-05.json");
    }

    #[test]
    fn bundle_has_three_top_level_keys() {
        let mut book = TerritoryBook::default();
        book.upsert_client(
            ClientDraft::new("Acme", vec![PostalCode::new("10001").unwrap()]),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();

        let json = ExportBundle::capture(&book, at).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["clients"].as_array().unwrap().len(), 1);
        assert_eq!(value["events"].as_array().unwrap().len(), 0);
        assert_eq!(value["export_date"], "2024-03-05T12:00:00Z");
    }

    #[test]
    fn write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let bundle = ExportBundle::capture(&TerritoryBook::default(), Utc::now());
        bundle.write_to(&path).unwrap();
        let back: ExportBundle =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.clients.len(), 0);
        assert_eq!(back.export_date, bundle.export_date);
    }
}
