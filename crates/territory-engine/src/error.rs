//! # Engine Errors
//!
//! Every error the engine produces is recoverable and user-correctable:
//!
//! - [`TerritoryViolation`]: the postal code belongs to another active
//!   client. A hard block; there is no override.
//! - [`CommitError::SchedulingConflict`]: the event would conflict with
//!   existing events. The caller may resubmit with
//!   [`ConflictPolicy::Proceed`](crate::ConflictPolicy::Proceed).
//! - [`CommitError::Validation`]: malformed or missing input.

use serde::Serialize;
use thiserror::Error;

use territory_core::{ClientId, EventId, PostalCode, ValidationError};

/// A postal-code exclusivity rule was broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerritoryViolation {
    /// Another active client holds the postal code.
    #[error(
        "postal code {postal_code} is assigned to another client ({holder_name}); \
         events cannot be scheduled there"
    )]
    ClaimedByOther {
        /// The contested postal code.
        postal_code: PostalCode,
        /// The active client holding it.
        holder: ClientId,
        /// Display name of the holder.
        holder_name: String,
    },

    /// The requesting client does not exist.
    #[error("unknown client {0}")]
    UnknownClient(ClientId),
}

/// An existing event that a submission would conflict with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictSummary {
    /// Conflicting event id.
    pub id: EventId,
    /// Conflicting event name.
    pub name: String,
    /// Conflicting event postal code.
    pub postal_code: PostalCode,
}

impl std::fmt::Display for ConflictSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.postal_code)
    }
}

/// A mutation of the territory book was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommitError {
    /// Input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The postal code is outside the client's permitted territory.
    #[error("territory violation: {0}")]
    Territory(#[from] TerritoryViolation),

    /// The event would conflict with existing events and the caller did not
    /// confirm.
    #[error(
        "event conflicts with {count} existing event(s): {details}",
        count = .conflicts.len(),
        details = join_summaries(.conflicts)
    )]
    SchedulingConflict {
        /// The events the submission would conflict with.
        conflicts: Vec<ConflictSummary>,
    },

    /// No client with this id exists.
    #[error("client not found: {0}")]
    UnknownClient(ClientId),

    /// No event with this id exists.
    #[error("event not found: {0}")]
    UnknownEvent(EventId),
}

fn join_summaries(conflicts: &[ConflictSummary]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
