#![deny(missing_docs)]

//! # territory-store: Persistence and Data Transfer
//!
//! - **Document store** (`document.rs`): the client and event collections as
//!   one JSON document under the stable keys `territory_clients_v2` and
//!   `territory_events_v2`. Saves replace the file atomically. Conflict sets
//!   are written for readers of the raw file but always recomputed on load.
//!
//! - **Import** (`import.rs`): one client per CSV row, matched by column
//!   position. Bad rows are collected, not fatal.
//!
//! - **Export** (`export.rs`): a verbatim dump of both collections with an
//!   export timestamp.
//!
//! ## Crate Policy
//!
//! - All I/O errors carry the path they occurred on.
//! - No `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod export;
pub mod import;

pub use document::{JsonFileStore, StoreDocument, CLIENTS_KEY, EVENTS_KEY};
pub use error::StoreError;
pub use export::{default_export_file_name, ExportBundle};
pub use import::{
    parse_clients, ImportOutcome, ImportReport, ParsedRow, RejectedRow, IMPORT_TEMPLATE,
    IMPORT_TEMPLATE_FILE_NAME,
};
