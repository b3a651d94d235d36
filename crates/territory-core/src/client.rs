//! # Clients
//!
//! A client holds a territory: a set of postal codes in which it has the
//! exclusive right to schedule events while it is active. Exclusivity is not
//! enforced on this record (two stored clients may list the same code); it
//! is enforced by the registry at the point of mutation.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{ClientId, PostalCode};

/// Lifecycle status of a client.
///
/// Only active clients reserve territory; an inactive client's postal codes
/// block nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// The client is operating and its territory is reserved.
    #[default]
    Active,
    /// The client is dormant; its territory is not reserved.
    Inactive,
}

impl ClientStatus {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Whether this client reserves its territory.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
                expected: "active, inactive",
            }),
        }
    }
}

/// A `#rrggbb` display color used to tell territories apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse a `#rrggbb` color. Hex digits are stored lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidColor`] for anything else.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = value.as_ref();
        let hex = raw
            .strip_prefix('#')
            .ok_or_else(|| ValidationError::InvalidColor(raw.to_string()))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidColor(raw.to_string()));
        }
        Ok(Self(format!("#{}", hex.to_ascii_lowercase())))
    }

    /// Build a color from a 24-bit RGB value; higher bits are ignored.
    pub fn from_rgb(rgb: u32) -> Self {
        Self(format!("#{:06x}", rgb & 0x00ff_ffff))
    }

    /// Access the `#rrggbb` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// A client and the postal codes assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Client identifier.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub contact_email: String,
    /// Contact phone number.
    pub contact_phone: String,
    /// Assigned postal codes. Duplicates are harmless.
    pub postal_codes: Vec<PostalCode>,
    /// Display color.
    pub color: Color,
    /// Lifecycle status.
    pub status: ClientStatus,
    /// Date the client was first recorded.
    pub created_on: NaiveDate,
}

impl Client {
    /// Whether the client lists `code` among its assigned postal codes.
    pub fn owns(&self, code: &PostalCode) -> bool {
        self.postal_codes.contains(code)
    }

    /// Whether the client is active (and therefore reserves its territory).
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// The client's assigned postal codes with duplicates removed, sorted.
    pub fn distinct_postal_codes(&self) -> BTreeSet<&PostalCode> {
        self.postal_codes.iter().collect()
    }
}
