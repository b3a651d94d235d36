#![deny(missing_docs)]

//! # territory-core: Foundational Types for the Territory Manager
//!
//! This crate defines the records every other crate in the workspace works
//! over. It has no internal crate dependencies, only `serde`, `thiserror`,
//! `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`EventId`], [`ClientId`],
//!    and [`PostalCode`] are distinct types. A client identifier cannot be
//!    passed where an event identifier is expected.
//!
//! 2. **Validated construction.** [`PostalCode`] and [`DateRange`] reject
//!    malformed input at construction. Once a value exists it satisfies its
//!    invariant (`end >= start`, five ASCII digits).
//!
//! 3. **Derived fields are plain data.** [`Event::conflicts`] and
//!    [`Event::coordinate`] are stored on the record but only ever written by
//!    the engine and the resolver. Nothing in this crate computes them.
//!
//! 4. **[`ValidationError`] hierarchy.** Structured errors with `thiserror`,
//!    no `.unwrap()` outside tests.

pub mod client;
pub mod coordinate;
pub mod error;
pub mod event;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use client::{Client, ClientStatus, Color};
pub use coordinate::Coordinate;
pub use error::ValidationError;
pub use event::{Event, EventStatus};
pub use identity::{ClientId, EventId, PostalCode};
pub use temporal::{parse_date, DateRange};
