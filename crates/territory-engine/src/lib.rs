#![deny(missing_docs)]

//! # territory-engine: Conflict Detection and Territory Exclusivity
//!
//! The only part of the Territory Manager with non-trivial logic.
//!
//! - **Overlap** (`overlap.rs`): closed-interval overlap on calendar dates.
//!   Touching endpoints overlap.
//!
//! - **Conflict** (`conflict.rs`): two events conflict when their date ranges
//!   overlap and their coordinates are within the [`ConflictRule`] radius
//!   (15 miles by default). [`ConflictRule::recompute`] rebuilds every
//!   event's conflict set from scratch; [`ConflictRule::would_conflict`] is
//!   the side-effect-free pre-insert check.
//!
//! - **Registry** (`registry.rs`): a postal code may be actively claimed by
//!   at most one active client. [`check_assignment`] is consulted before any
//!   event is accepted.
//!
//! - **Statistics** (`stats.rs`): the four summary counts shown alongside the
//!   event list.
//!
//! - **Filter** (`filter.rs`): search, client, and status filters over events.
//!
//! - **Book** (`book.rs`): [`TerritoryBook`] owns the client and event
//!   collections, runs the pre-commit hooks, and recomputes conflicts at the
//!   end of every mutation.
//!
//! ## Recompute Policy
//!
//! There is no background watcher. Derived conflict data is rebuilt by an
//! explicit call after each mutation, so it can never lag behind the events
//! it describes. The cost is an O(n²) pass per mutation.
//!
//! ## Crate Policy
//!
//! - Depends on `territory-core` and `territory-geo` internally.
//! - No I/O. Persistence lives in `territory-store`.
//! - No `.unwrap()` outside tests.

pub mod book;
pub mod conflict;
pub mod error;
pub mod filter;
pub mod overlap;
pub mod registry;
pub mod stats;

pub use book::{ClientDraft, ClientRemoval, ConflictPolicy, EventDraft, Submission, TerritoryBook};
pub use conflict::{
    compute_conflicts, conflict_pairs, would_conflict, CandidateEvent, ConflictRule,
    DEFAULT_CONFLICT_RADIUS_MILES,
};
pub use error::{CommitError, ConflictSummary, TerritoryViolation};
pub use filter::EventFilter;
pub use overlap::{overlaps, ranges_overlap};
pub use registry::{
    active_claims, check_assignment, check_new_claims, contested_codes, may_assign,
};
pub use stats::Statistics;
