//! Event list filters.

use serde::{Deserialize, Serialize};

use territory_core::{ClientId, Event, EventStatus};

/// Criteria for narrowing an event list. Every criterion that is set must
/// match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Case-insensitive substring of the event name, or a substring of the
    /// postal code.
    pub search: Option<String>,
    /// Owning client.
    pub client: Option<ClientId>,
    /// Exact status.
    pub status: Option<EventStatus>,
    /// Keep only active events.
    pub active_only: bool,
}

impl EventFilter {
    /// Whether `event` passes every criterion.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = event.name.to_lowercase().contains(&needle)
                || event.postal_code.as_str().contains(search);
            if !hit {
                return false;
            }
        }
        if self.client.is_some_and(|id| id != event.client_id) {
            return false;
        }
        if self.status.is_some_and(|status| status != event.status) {
            return false;
        }
        !self.active_only || event.is_active()
    }

    /// The matching events, in input order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}
