//! # territory-cli: Territory Manager Command Line
//!
//! Provides the `territory` binary. Every subcommand loads the store, applies
//! one operation through [`TerritoryBook`], and saves.
//!
//! ## Subcommands
//!
//! - `territory client`: add, edit, activate/deactivate, remove, list, show.
//! - `territory event`: add, edit, set status, remove, list, show. Conflicts
//!   abort the write unless `--force` is given.
//! - `territory conflicts`: every conflicting pair, plus contested codes.
//! - `territory stats`: the four summary counts.
//! - `territory import` / `export` / `template`: CSV client import, JSON
//!   export, and the import template.
//!
//! ```bash
//! territory client add --name "Acme Events" --zips "10001,10002"
//! territory event add --client <id> --name Gala --zip 10001 --start 2024-03-15
//! territory conflicts
//! ```

pub mod client;
pub mod config;
pub mod event;
pub mod report;
pub mod transfer;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::NaiveDate;

use territory_engine::{ConflictRule, TerritoryBook};
use territory_geo::PlaceholderGeocoder;
use territory_store::JsonFileStore;

use crate::config::Config;

/// Everything a subcommand needs: where the data lives and how to judge it.
#[derive(Debug, Clone)]
pub struct Context {
    /// Backing store.
    pub store: JsonFileStore,
    /// Conflict rule applied on load and on every mutation.
    pub rule: ConflictRule,
    /// Resolver for event postal codes.
    pub geocoder: PlaceholderGeocoder,
    /// Directory relative output paths are resolved against.
    pub work_dir: PathBuf,
}

impl Context {
    /// Build a context from validated configuration.
    pub fn from_config(config: &Config, work_dir: &Path) -> Self {
        Self {
            store: JsonFileStore::new(resolve_path(&config.store_path, work_dir)),
            rule: config.rule(),
            geocoder: config.geocoder(),
            work_dir: work_dir.to_path_buf(),
        }
    }

    /// Load the book from the store.
    pub fn load_book(&self) -> Result<TerritoryBook> {
        self.store
            .load(self.rule)
            .with_context(|| format!("failed to load {}", self.store.path().display()))
    }

    /// Save the book to the store.
    pub fn save_book(&self, book: &TerritoryBook) -> Result<()> {
        self.store
            .save(book)
            .with_context(|| format!("failed to save {}", self.store.path().display()))
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(path, &self.work_dir)
    }
}

/// Absolute paths are returned as-is; relative paths are joined to `base`.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Today's date in local time, used for new clients and export names.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A context whose store lives in a fresh temporary directory.
    pub fn context() -> (tempfile::TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::from_config(&Config::default(), dir.path());
        (dir, ctx)
    }
}
