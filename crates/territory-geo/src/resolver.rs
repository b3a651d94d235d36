//! # Postal-Code Resolver
//!
//! Maps a postal code to an approximate location.
//!
//! ## Placeholder Algorithm
//!
//! [`PlaceholderGeocoder`] does not consult any geographic data. It sums the
//! UTF-16 code units of the postal code into a bucket index, takes the index
//! modulo 200, and offsets a reference point by `index / 100 - 1` degrees on
//! both axes. Every code therefore lands inside a 2°×2° box anchored on the
//! reference point, and codes whose characters sum to nearby values land
//! near each other (`10001` and `10002` are under a mile apart).
//!
//! The derivation uses no randomness and no clock, so a code resolves to the
//! same bits in every process. The empty string sums to zero and still
//! resolves.
//!
//! To use real geocoding, implement [`Geocoder`] over a lookup service; the
//! conflict engine only ever sees the resulting [`Coordinate`].

use serde::{Deserialize, Serialize};
use territory_core::Coordinate;

/// Reference point for the placeholder resolver (New York City Hall).
const DEFAULT_REFERENCE: Coordinate = Coordinate::new(40.7128, -74.0060);

/// Number of distinct offsets the placeholder resolver produces per axis.
const BUCKETS: u64 = 200;

/// Locality label reported by the placeholder resolver.
const PLACEHOLDER_LOCALITY: &str = "City, NY";

/// A resolved postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalLocation {
    /// The postal code as supplied.
    pub postal_code: String,
    /// Approximate location of the postal code.
    pub coordinate: Coordinate,
    /// Human-readable locality label.
    pub locality: String,
}

/// Resolves postal codes to locations.
///
/// Implementations must be deterministic for a given postal code: the
/// conflict engine assumes that resolving the same code twice places two
/// events at the same point.
pub trait Geocoder {
    /// Resolve a postal code to a location. Never fails; unknown or
    /// malformed codes still produce a location.
    fn locate(&self, postal_code: &str) -> PostalLocation;

    /// Resolve a postal code to its coordinate only.
    fn resolve(&self, postal_code: &str) -> Coordinate {
        self.locate(postal_code).coordinate
    }
}

/// Deterministic stand-in geocoder. See the module docs for the algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderGeocoder {
    reference: Coordinate,
}

impl PlaceholderGeocoder {
    /// Create a resolver anchored on the default reference point.
    pub fn new() -> Self {
        Self {
            reference: DEFAULT_REFERENCE,
        }
    }

    /// Create a resolver anchored on a custom reference point.
    pub fn with_reference(reference: Coordinate) -> Self {
        Self { reference }
    }

    /// The reference point offsets are applied to.
    pub fn reference(&self) -> Coordinate {
        self.reference
    }

    fn offset(postal_code: &str) -> f64 {
        let sum: u64 = postal_code.encode_utf16().map(u64::from).sum();
        (sum % BUCKETS) as f64 / 100.0
    }
}

impl Default for PlaceholderGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for PlaceholderGeocoder {
    fn locate(&self, postal_code: &str) -> PostalLocation {
        let offset = Self::offset(postal_code);
        PostalLocation {
            postal_code: postal_code.to_string(),
            coordinate: Coordinate::new(
                self.reference.latitude + offset - 1.0,
                self.reference.longitude + offset - 1.0,
            ),
            locality: PLACEHOLDER_LOCALITY.to_string(),
        }
    }
}

/// Resolve a postal code with the default [`PlaceholderGeocoder`].
pub fn resolve(postal_code: &str) -> Coordinate {
    PlaceholderGeocoder::new().resolve(postal_code)
}
