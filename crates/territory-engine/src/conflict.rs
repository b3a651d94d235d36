//! # Conflict Engine
//!
//! Two distinct events conflict when their date ranges overlap (inclusive)
//! and their coordinates are no more than the configured radius apart.
//!
//! ## Semantics
//!
//! - The relation is symmetric: if A conflicts with B, B conflicts with A.
//! - No event conflicts with itself, even if the collection contains two
//!   records with the same id.
//! - Events of the same client conflict with each other like any other pair.
//! - Status is ignored: completed and cancelled events still participate.
//!
//! ## Recompute-from-Scratch
//!
//! [`ConflictRule::recompute`] clears every conflict set and rebuilds it
//! over all unordered pairs. It is idempotent and never appends to stale
//! data. The pass is O(n²) in the number of events.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use territory_core::{Coordinate, DateRange, Event, EventId};
use territory_geo::distance_miles;

use crate::overlap::ranges_overlap;

/// Default conflict radius in miles.
pub const DEFAULT_CONFLICT_RADIUS_MILES: f64 = 15.0;

/// The distance-and-time rule that decides whether two events conflict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictRule {
    /// Maximum distance in miles (inclusive) at which overlapping events
    /// conflict.
    pub radius_miles: f64,
}

impl Default for ConflictRule {
    fn default() -> Self {
        Self {
            radius_miles: DEFAULT_CONFLICT_RADIUS_MILES,
        }
    }
}

/// A prospective event, checked before it is committed.
///
/// Any field may be absent while the submitter is still filling in a form;
/// a candidate without a coordinate or a schedule conflicts with nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateEvent {
    /// Id of the event being edited, if this is an edit. That event is
    /// skipped when checking.
    pub id: Option<EventId>,
    /// Resolved location.
    pub coordinate: Option<Coordinate>,
    /// Proposed dates.
    pub schedule: Option<DateRange>,
}

impl From<&Event> for CandidateEvent {
    fn from(event: &Event) -> Self {
        Self {
            id: Some(event.id),
            coordinate: Some(event.coordinate),
            schedule: Some(event.schedule),
        }
    }
}

impl ConflictRule {
    /// A rule with a custom radius.
    pub fn with_radius(radius_miles: f64) -> Self {
        Self { radius_miles }
    }

    /// Whether two placements conflict under this rule.
    ///
    /// The date check runs first; distance is only computed for overlapping
    /// ranges.
    pub fn placements_conflict(
        &self,
        a_schedule: &DateRange,
        a_coordinate: Coordinate,
        b_schedule: &DateRange,
        b_coordinate: Coordinate,
    ) -> bool {
        ranges_overlap(a_schedule, b_schedule)
            && distance_miles(a_coordinate, b_coordinate) <= self.radius_miles
    }

    /// Whether two events conflict under this rule. Always false for the
    /// same id.
    pub fn events_conflict(&self, a: &Event, b: &Event) -> bool {
        a.id != b.id
            && self.placements_conflict(&a.schedule, a.coordinate, &b.schedule, b.coordinate)
    }

    /// Rebuild every event's conflict set in place.
    pub fn recompute(&self, events: &mut [Event]) {
        let mut adjacency: Vec<BTreeSet<EventId>> = vec![BTreeSet::new(); events.len()];
        let mut pairs = 0usize;

        for (i, a) in events.iter().enumerate() {
            for (offset, b) in events[i + 1..].iter().enumerate() {
                if self.events_conflict(a, b) {
                    adjacency[i].insert(b.id);
                    adjacency[i + 1 + offset].insert(a.id);
                    pairs += 1;
                }
            }
        }

        for (event, conflicts) in events.iter_mut().zip(adjacency) {
            event.conflicts = conflicts;
        }

        tracing::debug!(
            events = events.len(),
            pairs,
            radius_miles = self.radius_miles,
            "recomputed event conflicts"
        );
    }

    /// Return the events with every conflict set replaced by the recomputed
    /// one.
    pub fn compute_conflicts(&self, mut events: Vec<Event>) -> Vec<Event> {
        self.recompute(&mut events);
        events
    }

    /// Ids of the existing events the candidate would conflict with, in the
    /// order they appear in `existing`. Nothing is mutated.
    pub fn would_conflict(&self, candidate: &CandidateEvent, existing: &[Event]) -> Vec<EventId> {
        let (Some(coordinate), Some(schedule)) = (candidate.coordinate, candidate.schedule) else {
            return Vec::new();
        };

        existing
            .iter()
            .filter(|event| candidate.id != Some(event.id))
            .filter(|event| {
                self.placements_conflict(&schedule, coordinate, &event.schedule, event.coordinate)
            })
            .map(|event| event.id)
            .collect()
    }
}

/// Recompute conflicts with the default 15-mile rule.
pub fn compute_conflicts(events: Vec<Event>) -> Vec<Event> {
    ConflictRule::default().compute_conflicts(events)
}

/// Pre-insert conflict check with the default 15-mile rule.
pub fn would_conflict(candidate: &CandidateEvent, existing: &[Event]) -> Vec<EventId> {
    ConflictRule::default().would_conflict(candidate, existing)
}

/// Every distinct conflicting pair recorded on the events, smaller id first,
/// sorted.
pub fn conflict_pairs(events: &[Event]) -> Vec<(EventId, EventId)> {
    let pairs: BTreeSet<(EventId, EventId)> = events
        .iter()
        .flat_map(|event| {
            event.conflicts.iter().filter(|other| **other != event.id).map(move |other| {
                if event.id < *other {
                    (event.id, *other)
                } else {
                    (*other, event.id)
                }
            })
        })
        .collect();
    pairs.into_iter().collect()
}
