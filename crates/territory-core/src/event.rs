//! # Events
//!
//! An event is a scheduled engagement owned by one client, placed at a
//! postal code and spanning an inclusive date range.
//!
//! ## Derived Fields
//!
//! - [`Event::coordinate`] is resolved from the postal code when the event is
//!   submitted; it is never user-entered.
//! - [`Event::conflicts`] is rebuilt from scratch by the conflict engine
//!   whenever the event collection changes. It is symmetric across the
//!   collection and never contains the event's own id.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::ValidationError;
use crate::identity::{ClientId, EventId, PostalCode};
use crate::temporal::DateRange;

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Scheduled and going ahead.
    #[default]
    Active,
    /// Took place.
    Completed,
    /// Called off.
    Cancelled,
}

impl EventStatus {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
                expected: "active, completed, cancelled",
            }),
        }
    }
}

/// A scheduled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier.
    pub id: EventId,
    /// Owning client.
    pub client_id: ClientId,
    /// Display name.
    pub name: String,
    /// Postal code the event takes place in.
    pub postal_code: PostalCode,
    /// Optional street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Location resolved from the postal code.
    pub coordinate: Coordinate,
    /// Inclusive date range.
    pub schedule: DateRange,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Ids of events this one conflicts with. Derived; see module docs.
    #[serde(default)]
    pub conflicts: BTreeSet<EventId>,
}

impl Event {
    /// Whether the event has at least one conflict.
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Whether the event is active.
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }
}
