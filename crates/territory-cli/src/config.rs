//! # Configuration
//!
//! Optional YAML file, `territory.yaml` in the working directory unless
//! `--config` names another. Every field has a default:
//!
//! ```yaml
//! store_path: .territory/store.json
//! conflict_radius_miles: 15.0
//! reference_point: { latitude: 40.7128, longitude: -74.0060 }
//! ```
//!
//! `--store` and `--radius` override the file. Values are validated after
//! overrides are applied.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use territory_core::Coordinate;
use territory_engine::{ConflictRule, DEFAULT_CONFLICT_RADIUS_MILES};
use territory_geo::PlaceholderGeocoder;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "territory.yaml";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON store location, relative to the working directory unless
    /// absolute.
    pub store_path: PathBuf,
    /// Conflict radius in miles.
    pub conflict_radius_miles: f64,
    /// Anchor of the placeholder geocoder.
    pub reference_point: Coordinate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".territory").join("store.json"),
            conflict_radius_miles: DEFAULT_CONFLICT_RADIUS_MILES,
            reference_point: PlaceholderGeocoder::new().reference(),
        }
    }
}

impl Config {
    /// Parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load `explicit` if given, else `territory.yaml` in `work_dir` if it
    /// exists, else defaults.
    pub fn discover(explicit: Option<&Path>, work_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(&crate::resolve_path(path, work_dir));
        }
        let candidate = work_dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, store: Option<PathBuf>, radius: Option<f64>) -> Result<Self> {
        if let Some(store) = store {
            self.store_path = store;
        }
        if let Some(radius) = radius {
            self.conflict_radius_miles = radius;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let radius = self.conflict_radius_miles;
        if !radius.is_finite() || radius <= 0.0 {
            bail!("conflict_radius_miles must be a positive number, got {radius}");
        }
        if !self.reference_point.is_valid() {
            bail!(
                "reference_point {} is out of range (latitude ±90, longitude ±180)",
                self.reference_point
            );
        }
        if self.store_path.as_os_str().is_empty() {
            bail!("store_path must not be empty");
        }
        Ok(())
    }

    /// The conflict rule this config describes.
    pub fn rule(&self) -> ConflictRule {
        ConflictRule::with_radius(self.conflict_radius_miles)
    }

    /// The geocoder this config describes.
    pub fn geocoder(&self) -> PlaceholderGeocoder {
        PlaceholderGeocoder::with_reference(self.reference_point)
    }
}
