//! Summary counts shown alongside the event list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use territory_core::{Client, Event};

/// Aggregate counts over the current collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Events with status active.
    pub active_events: usize,
    /// Conflicting pairs: total conflict-set entries divided by two.
    pub conflict_pairs: usize,
    /// Clients with status active.
    pub active_clients: usize,
    /// Distinct postal codes listed by any client, active or not.
    pub claimed_postal_codes: usize,
}

impl Statistics {
    /// Derive the counts. Assumes conflict sets are freshly recomputed, so
    /// every pair is recorded on both sides.
    pub fn compute(events: &[Event], clients: &[Client]) -> Self {
        let entries: usize = events.iter().map(|e| e.conflicts.len()).sum();
        let claimed: BTreeSet<_> = clients.iter().flat_map(|c| c.postal_codes.iter()).collect();

        Self {
            active_events: events.iter().filter(|e| e.is_active()).count(),
            conflict_pairs: entries / 2,
            active_clients: clients.iter().filter(|c| c.is_active()).count(),
            claimed_postal_codes: claimed.len(),
        }
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "active events: {}, conflicts: {}, active clients: {}, postal codes: {}",
            self.active_events, self.conflict_pairs, self.active_clients, self.claimed_postal_codes
        )
    }
}
