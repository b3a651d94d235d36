//! # Great-Circle Distance
//!
//! Haversine distance on a spherical Earth of radius 3959 miles.
//!
//! ## Symmetry
//!
//! The conflict relation must be symmetric, so `distance(p, q)` and
//! `distance(q, p)` have to agree bit for bit, not just approximately. The
//! two points are put in a canonical order before the formula runs.
//!
//! Inputs are not range-checked; out-of-range degrees produce finite but
//! meaningless results.

use std::cmp::Ordering;

use territory_core::Coordinate;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance in miles between two coordinates.
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let (p, q) = if canonical_order(&a, &b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    };

    let d_lat = (q.latitude - p.latitude).to_radians();
    let d_lon = (q.longitude - p.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + p.latitude.to_radians().cos()
            * q.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push near-antipodal inputs fractionally above 1.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Great-circle distance in miles between two latitude/longitude pairs.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance_miles(Coordinate::new(lat1, lon1), Coordinate::new(lat2, lon2))
}

fn canonical_order(a: &Coordinate, b: &Coordinate) -> Ordering {
    a.latitude
        .total_cmp(&b.latitude)
        .then(a.longitude.total_cmp(&b.longitude))
}
