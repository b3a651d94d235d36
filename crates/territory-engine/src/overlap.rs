//! # Interval Overlap
//!
//! Closed-interval overlap on calendar dates: `[a₀, a₁]` and `[b₀, b₁]`
//! overlap iff `a₀ ≤ b₁ ∧ a₁ ≥ b₀`. An event ending on the day another
//! starts overlaps it; a one-day gap does not.

use chrono::NaiveDate;

use territory_core::DateRange;

/// Whether two inclusive date ranges given by their endpoints overlap.
///
/// Callers must supply `end >= start` for both ranges; [`DateRange`]
/// guarantees this, so prefer [`ranges_overlap`].
pub fn overlaps(start_a: NaiveDate, end_a: NaiveDate, start_b: NaiveDate, end_b: NaiveDate) -> bool {
    start_a <= end_b && end_a >= start_b
}

/// Whether two date ranges overlap.
pub fn ranges_overlap(a: &DateRange, b: &DateRange) -> bool {
    overlaps(a.start(), a.end(), b.start(), b.end())
}
