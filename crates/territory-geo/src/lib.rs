#![deny(missing_docs)]

//! # territory-geo: Postal-Code Geocoding and Distance
//!
//! Two leaf components that the conflict engine is built on:
//!
//! - **Resolver** (`resolver.rs`): maps a postal code to an approximate
//!   coordinate behind the [`Geocoder`] trait. The shipped
//!   [`PlaceholderGeocoder`] derives a coordinate from the characters of the
//!   code itself. It is deterministic across processes and suitable for
//!   tests and demos, not for production geocoding.
//!
//! - **Distance** (`distance.rs`): haversine great-circle distance in miles.
//!
//! ## Crate Policy
//!
//! - Depends only on `territory-core`.
//! - No I/O, no randomness, no wall-clock input.

pub mod distance;
pub mod resolver;

pub use distance::{distance, distance_miles, EARTH_RADIUS_MILES};
pub use resolver::{resolve, Geocoder, PlaceholderGeocoder, PostalLocation};
