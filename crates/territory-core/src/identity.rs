//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers and postal codes. Each is a
//! distinct type; you cannot pass a [`ClientId`] where an [`EventId`] is
//! expected.
//!
//! ## Validation
//!
//! UUID-based identifiers ([`EventId`], [`ClientId`]) are always valid by
//! construction. [`PostalCode`] validates the five-digit format at
//! construction; the stored value is trimmed.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Create a new random event identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an event identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(s.to_string()))
    }
}

/// A unique identifier for a client (the holder of a territory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a client identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Postal codes (validated at construction)
// ---------------------------------------------------------------------------

/// A five-digit postal code.
///
/// Postal codes are the unit of territory: clients claim them, events are
/// placed in them. Leading zeros are significant (`"02134"` is valid and
/// distinct from `"2134"`).
///
/// # Validation
///
/// - Surrounding whitespace is trimmed.
/// - Must be exactly 5 ASCII digits after trimming.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Create a postal code, validating the five-digit format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for empty input and
    /// [`ValidationError::InvalidPostalCode`] for anything else that is not
    /// exactly 5 digits.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = value.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField {
                field: "postal code",
            });
        }
        if trimmed.len() != 5 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPostalCode(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parse a comma-delimited list of postal codes.
    ///
    /// Returns the valid codes in input order and, separately, every entry
    /// that failed validation. Empty entries (e.g. a trailing comma) are
    /// ignored silently.
    pub fn parse_list(list: &str) -> (Vec<Self>, Vec<String>) {
        let mut valid = Vec::new();
        let mut rejected = Vec::new();
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match Self::new(entry) {
                Ok(code) => valid.push(code),
                Err(_) => rejected.push(entry.to_string()),
            }
        }
        (valid, rejected)
    }

    /// Access the postal code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PostalCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}
