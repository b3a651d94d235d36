//! # Territory Book
//!
//! [`TerritoryBook`] owns the client and event collections and is the only
//! place they are mutated. Every mutating method validates its input, runs
//! the pre-commit hooks, applies the change, and finishes with
//! [`TerritoryBook::recompute`].
//!
//! ## Pre-Commit Hooks
//!
//! [`TerritoryBook::submit_event`] runs, in order:
//!
//! 1. Validation of the draft and its references.
//! 2. The territory check ([`check_assignment`]). A violation is a hard
//!    block.
//! 3. Coordinate resolution through the supplied [`Geocoder`].
//! 4. The pre-insert conflict check ([`ConflictRule::would_conflict`]).
//!    With [`ConflictPolicy::Abort`] any conflict refuses the write; with
//!    [`ConflictPolicy::Proceed`] the write goes through and the conflicts
//!    are reported in the [`Submission`].
//!
//! Saving an active client runs the territory check for every code the client
//! did not already hold while active.
//!
//! ## Concurrency
//!
//! The book is plain owned data. Hosts serving several writers must
//! serialize them.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use territory_core::{
    Client, ClientId, ClientStatus, Color, DateRange, Event, EventId, EventStatus, PostalCode,
    ValidationError,
};
use territory_geo::Geocoder;

use crate::conflict::{conflict_pairs, CandidateEvent, ConflictRule};
use crate::error::{CommitError, ConflictSummary};
use crate::registry::{check_assignment, check_new_claims, contested_codes};
use crate::stats::Statistics;

/// What to do when a submitted event would conflict with existing events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Refuse the write with [`CommitError::SchedulingConflict`].
    #[default]
    Abort,
    /// Write anyway.
    Proceed,
}

/// Input for creating or updating a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDraft {
    /// Existing client to update; `None` creates a new client.
    pub id: Option<ClientId>,
    /// Display name. Required.
    pub name: String,
    /// Contact email address.
    pub contact_email: String,
    /// Contact phone number.
    pub contact_phone: String,
    /// Assigned postal codes.
    pub postal_codes: Vec<PostalCode>,
    /// Display color. New clients without one get a random color; existing
    /// clients keep theirs.
    pub color: Option<Color>,
    /// Lifecycle status.
    pub status: ClientStatus,
}

impl ClientDraft {
    /// A draft for a new active client with no contact details.
    pub fn new(name: impl Into<String>, postal_codes: Vec<PostalCode>) -> Self {
        Self {
            id: None,
            name: name.into(),
            contact_email: String::new(),
            contact_phone: String::new(),
            postal_codes,
            color: None,
            status: ClientStatus::Active,
        }
    }

    /// A draft pre-filled from an existing client, for editing.
    pub fn from_client(client: &Client) -> Self {
        Self {
            id: Some(client.id),
            name: client.name.clone(),
            contact_email: client.contact_email.clone(),
            contact_phone: client.contact_phone.clone(),
            postal_codes: client.postal_codes.clone(),
            color: Some(client.color.clone()),
            status: client.status,
        }
    }
}

/// Input for creating or updating an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    /// Existing event to update; `None` creates a new event.
    pub id: Option<EventId>,
    /// Owning client.
    pub client_id: ClientId,
    /// Display name. Required.
    pub name: String,
    /// Postal code the event takes place in.
    pub postal_code: PostalCode,
    /// Optional street address.
    pub address: Option<String>,
    /// Inclusive date range.
    pub schedule: DateRange,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Free-text notes.
    pub notes: String,
}

impl EventDraft {
    /// A draft for a new active event.
    pub fn new(
        client_id: ClientId,
        name: impl Into<String>,
        postal_code: PostalCode,
        schedule: DateRange,
    ) -> Self {
        Self {
            id: None,
            client_id,
            name: name.into(),
            postal_code,
            address: None,
            schedule,
            status: EventStatus::Active,
            notes: String::new(),
        }
    }

    /// A draft pre-filled from an existing event, for editing.
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: Some(event.id),
            client_id: event.client_id,
            name: event.name.clone(),
            postal_code: event.postal_code.clone(),
            address: event.address.clone(),
            schedule: event.schedule,
            status: event.status,
            notes: event.notes.clone(),
        }
    }
}

/// Result of a committed event submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Id of the created or updated event.
    pub id: EventId,
    /// Events it conflicted with at commit time. Empty unless the caller
    /// proceeded past a conflict.
    pub conflicts: Vec<ConflictSummary>,
}

/// Result of removing a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRemoval {
    /// The removed client.
    pub client: Client,
    /// Number of the client's events removed with it.
    pub removed_events: usize,
}

/// The client and event collections, with conflict data kept current.
///
/// Deserializing goes through [`TerritoryBook::from_parts`], so stored
/// conflict sets are never trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BookParts")]
pub struct TerritoryBook {
    clients: Vec<Client>,
    events: Vec<Event>,
    rule: ConflictRule,
}

#[derive(Deserialize)]
struct BookParts {
    #[serde(default)]
    clients: Vec<Client>,
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    rule: ConflictRule,
}

impl From<BookParts> for TerritoryBook {
    fn from(parts: BookParts) -> Self {
        Self::from_parts(parts.clients, parts.events, parts.rule)
    }
}

impl TerritoryBook {
    /// An empty book using `rule`.
    pub fn new(rule: ConflictRule) -> Self {
        Self {
            clients: Vec::new(),
            events: Vec::new(),
            rule,
        }
    }

    /// A book over existing collections. Stored conflict sets are discarded
    /// and recomputed. Events whose client is missing are dropped.
    pub fn from_parts(clients: Vec<Client>, mut events: Vec<Event>, rule: ConflictRule) -> Self {
        events.retain(|event| {
            let owned = clients.iter().any(|c| c.id == event.client_id);
            if !owned {
                tracing::warn!(
                    event_id = %event.id,
                    client_id = %event.client_id,
                    "dropping event with unknown client"
                );
            }
            owned
        });
        let mut book = Self {
            clients,
            events,
            rule,
        };
        book.recompute();
        book
    }

    /// Consume the book, returning its collections.
    pub fn into_parts(self) -> (Vec<Client>, Vec<Event>) {
        (self.clients, self.events)
    }

    /// All clients, in insertion order.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// All events, in insertion order, with current conflict sets.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The active conflict rule.
    pub fn rule(&self) -> ConflictRule {
        self.rule
    }

    /// Replace the conflict rule and recompute.
    pub fn set_rule(&mut self, rule: ConflictRule) {
        self.rule = rule;
        self.recompute();
    }

    /// Look up a client.
    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Look up an event.
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events owned by `client_id`, in insertion order.
    pub fn events_for_client(&self, client_id: ClientId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.client_id == client_id)
            .collect()
    }

    /// Summary counts over the current collections.
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.events, &self.clients)
    }

    /// Every distinct conflicting pair, smaller id first.
    pub fn conflict_pairs(&self) -> Vec<(EventId, EventId)> {
        conflict_pairs(&self.events)
    }

    /// Codes listed by more than one active client.
    pub fn contested_codes(&self) -> std::collections::BTreeMap<PostalCode, Vec<ClientId>> {
        contested_codes(&self.clients)
    }

    /// Rebuild every event's conflict set from scratch.
    pub fn recompute(&mut self) {
        self.rule.recompute(&mut self.events);
    }

    // -----------------------------------------------------------------------
    // Clients
    // -----------------------------------------------------------------------

    /// Create or update a client.
    ///
    /// An update keeps the client's creation date, and its color unless the
    /// draft supplies one. An active client may not list a code that another
    /// active client holds, except codes it already held while active.
    pub fn upsert_client(
        &mut self,
        draft: ClientDraft,
        today: NaiveDate,
    ) -> Result<ClientId, CommitError> {
        let name = required(&draft.name, "client name")?;
        let postal_codes = dedup(draft.postal_codes);

        let existing = match draft.id {
            Some(id) => Some(
                self.clients
                    .iter()
                    .position(|c| c.id == id)
                    .ok_or(CommitError::UnknownClient(id))?,
            ),
            None => None,
        };
        let id = draft.id.unwrap_or_default();

        if draft.status.is_active() {
            let previously_held: &[PostalCode] = match existing.map(|i| &self.clients[i]) {
                Some(prior) if prior.is_active() => &prior.postal_codes,
                _ => &[],
            };
            let claimed: Vec<PostalCode> = postal_codes
                .iter()
                .filter(|code| !previously_held.contains(code))
                .cloned()
                .collect();
            check_new_claims(id, &claimed, &self.clients)?;
        }

        let (color, created_on) = match existing.map(|i| &self.clients[i]) {
            Some(prior) => (
                draft.color.unwrap_or_else(|| prior.color.clone()),
                prior.created_on,
            ),
            None => (draft.color.unwrap_or_else(random_color), today),
        };

        let client = Client {
            id,
            name,
            contact_email: draft.contact_email.trim().to_string(),
            contact_phone: draft.contact_phone.trim().to_string(),
            postal_codes,
            color,
            status: draft.status,
            created_on,
        };

        tracing::info!(
            client_id = %id,
            name = %client.name,
            postal_codes = client.postal_codes.len(),
            status = %client.status,
            updated = existing.is_some(),
            "client saved"
        );

        match existing {
            Some(index) => self.clients[index] = client,
            None => self.clients.push(client),
        }
        self.recompute();
        Ok(id)
    }

    /// Change a client's status. Reactivating a client re-checks all of its
    /// codes against the other active clients.
    pub fn set_client_status(
        &mut self,
        id: ClientId,
        status: ClientStatus,
    ) -> Result<(), CommitError> {
        let index = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or(CommitError::UnknownClient(id))?;

        let client = &self.clients[index];
        if status.is_active() && !client.is_active() {
            check_new_claims(id, &client.postal_codes, &self.clients)?;
        }

        self.clients[index].status = status;
        tracing::info!(client_id = %id, status = %status, "client status changed");
        self.recompute();
        Ok(())
    }

    /// Remove a client and every event it owns.
    pub fn remove_client(&mut self, id: ClientId) -> Result<ClientRemoval, CommitError> {
        let index = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or(CommitError::UnknownClient(id))?;
        let client = self.clients.remove(index);

        let before = self.events.len();
        self.events.retain(|e| e.client_id != id);
        let removed_events = before - self.events.len();

        tracing::info!(client_id = %id, removed_events, "client removed");
        self.recompute();
        Ok(ClientRemoval {
            client,
            removed_events,
        })
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Create or update an event after running the pre-commit hooks.
    pub fn submit_event(
        &mut self,
        draft: EventDraft,
        geocoder: &dyn Geocoder,
        policy: ConflictPolicy,
    ) -> Result<Submission, CommitError> {
        let name = required(&draft.name, "event name")?;

        let existing = match draft.id {
            Some(id) => Some(
                self.events
                    .iter()
                    .position(|e| e.id == id)
                    .ok_or(CommitError::UnknownEvent(id))?,
            ),
            None => None,
        };
        if self.client(draft.client_id).is_none() {
            return Err(CommitError::UnknownClient(draft.client_id));
        }
        check_assignment(draft.client_id, &draft.postal_code, &self.clients)?;

        let coordinate = geocoder.resolve(draft.postal_code.as_str());
        let candidate = CandidateEvent {
            id: draft.id,
            coordinate: Some(coordinate),
            schedule: Some(draft.schedule),
        };
        let conflicts: Vec<ConflictSummary> = self
            .rule
            .would_conflict(&candidate, &self.events)
            .into_iter()
            .filter_map(|id| self.event(id))
            .map(|e| ConflictSummary {
                id: e.id,
                name: e.name.clone(),
                postal_code: e.postal_code.clone(),
            })
            .collect();

        if !conflicts.is_empty() && policy == ConflictPolicy::Abort {
            return Err(CommitError::SchedulingConflict { conflicts });
        }

        let id = draft.id.unwrap_or_default();
        let event = Event {
            id,
            client_id: draft.client_id,
            name,
            postal_code: draft.postal_code,
            address: draft
                .address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            coordinate,
            schedule: draft.schedule,
            status: draft.status,
            notes: draft.notes,
            conflicts: Default::default(),
        };

        if !conflicts.is_empty() {
            tracing::warn!(
                event_id = %id,
                conflicts = conflicts.len(),
                "event saved despite scheduling conflicts"
            );
        }
        tracing::info!(
            event_id = %id,
            client_id = %event.client_id,
            postal_code = %event.postal_code,
            schedule = %event.schedule,
            updated = existing.is_some(),
            "event saved"
        );

        match existing {
            Some(index) => self.events[index] = event,
            None => self.events.push(event),
        }
        self.recompute();
        Ok(Submission { id, conflicts })
    }

    /// Change an event's status.
    pub fn set_event_status(&mut self, id: EventId, status: EventStatus) -> Result<(), CommitError> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CommitError::UnknownEvent(id))?;
        event.status = status;
        tracing::info!(event_id = %id, status = %status, "event status changed");
        self.recompute();
        Ok(())
    }

    /// Remove an event.
    pub fn remove_event(&mut self, id: EventId) -> Result<Event, CommitError> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(CommitError::UnknownEvent(id))?;
        let event = self.events.remove(index);
        tracing::info!(event_id = %id, "event removed");
        self.recompute();
        Ok(event)
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

fn dedup(codes: Vec<PostalCode>) -> Vec<PostalCode> {
    let mut seen = std::collections::BTreeSet::new();
    codes
        .into_iter()
        .filter(|code| seen.insert(code.clone()))
        .collect()
}

fn random_color() -> Color {
    Color::from_rgb(rand::thread_rng().gen_range(0..=0xFF_FFFF))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerritoryViolation;
    use territory_core::parse_date;
    use territory_geo::PlaceholderGeocoder;

    fn code(s: &str) -> PostalCode {
        PostalCode::new(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(day(start), day(end)).unwrap()
    }

    fn add_client(book: &mut TerritoryBook, name: &str, codes: &[&str]) -> ClientId {
        let draft = ClientDraft::new(name, codes.iter().map(|c| code(c)).collect());
        book.upsert_client(draft, day("2024-01-01")).unwrap()
    }

    fn add_event(
        book: &mut TerritoryBook,
        client: ClientId,
        zip: &str,
        start: &str,
        end: &str,
    ) -> Result<Submission, CommitError> {
        let draft = EventDraft::new(client, format!("Event {zip}"), code(zip), range(start, end));
        book.submit_event(draft, &PlaceholderGeocoder::new(), ConflictPolicy::Abort)
    }

    #[test]
    fn new_client_gets_color_and_creation_date() {
        let mut book = TerritoryBook::default();
        let id = add_client(&mut book, "Acme", &["10001"]);
        let client = book.client(id).unwrap();
        assert_eq!(client.created_on, day("2024-01-01"));
        assert!(client.color.as_str().starts_with('#'));
        assert_eq!(client.color.as_str().len(), 7);
    }

    #[test]
    fn update_keeps_color_and_creation_date() {
        let mut book = TerritoryBook::default();
        let id = add_client(&mut book, "Acme", &["10001"]);
        let before = book.client(id).unwrap().clone();

        let mut draft = ClientDraft::from_client(&before);
        draft.color = None;
        draft.name = "Acme Events".to_string();
        book.upsert_client(draft, day("2024-06-01")).unwrap();

        let after = book.client(id).unwrap();
        assert_eq!(after.name, "Acme Events");
        assert_eq!(after.color, before.color);
        assert_eq!(after.created_on, day("2024-01-01"));
        assert_eq!(book.clients().len(), 1);
    }

    #[test]
    fn client_name_is_required() {
        let mut book = TerritoryBook::default();
        let err = book
            .upsert_client(ClientDraft::new("  ", vec![]), day("2024-01-01"))
            .unwrap_err();
        assert_eq!(
            err,
            CommitError::Validation(ValidationError::MissingField {
                field: "client name"
            })
        );
    }

    #[test]
    fn duplicate_codes_are_collapsed() {
        let mut book = TerritoryBook::default();
        let id = add_client(&mut book, "Acme", &["10001", "10001", "10002"]);
        assert_eq!(book.client(id).unwrap().postal_codes.len(), 2);
    }

    #[test]
    fn active_client_cannot_claim_held_code() {
        let mut book = TerritoryBook::default();
        add_client(&mut book, "X", &["10001"]);
        let err = book
            .upsert_client(ClientDraft::new("Y", vec![code("10001")]), day("2024-01-01"))
            .unwrap_err();
        assert!(matches!(
            err,
            CommitError::Territory(TerritoryViolation::ClaimedByOther { .. })
        ));
        assert_eq!(book.clients().len(), 1);
    }

    #[test]
    fn inactive_client_may_list_held_code_but_not_reactivate() {
        let mut book = TerritoryBook::default();
        add_client(&mut book, "X", &["10001"]);
        let mut draft = ClientDraft::new("Y", vec![code("10001")]);
        draft.status = ClientStatus::Inactive;
        let y = book.upsert_client(draft, day("2024-01-01")).unwrap();

        let err = book.set_client_status(y, ClientStatus::Active).unwrap_err();
        assert!(matches!(err, CommitError::Territory(_)));
        assert_eq!(book.client(y).unwrap().status, ClientStatus::Inactive);
    }

    #[test]
    fn update_with_unknown_id_is_refused() {
        let mut book = TerritoryBook::default();
        let mut draft = ClientDraft::new("Ghost", vec![]);
        let ghost = ClientId::new();
        draft.id = Some(ghost);
        assert_eq!(
            book.upsert_client(draft, day("2024-01-01")),
            Err(CommitError::UnknownClient(ghost))
        );
    }

    #[test]
    fn event_in_other_active_territory_is_rejected() {
        let mut book = TerritoryBook::default();
        add_client(&mut book, "X", &["10001"]);
        let y = add_client(&mut book, "Y", &[]);

        let err = add_event(&mut book, y, "10001", "2024-03-15", "2024-03-15").unwrap_err();
        match err {
            CommitError::Territory(TerritoryViolation::ClaimedByOther {
                postal_code,
                holder_name,
                ..
            }) => {
                assert_eq!(postal_code.as_str(), "10001");
                assert_eq!(holder_name, "X");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(book.events().is_empty());
    }

    #[test]
    fn inactive_holder_does_not_block_events() {
        let mut book = TerritoryBook::default();
        let x = add_client(&mut book, "X", &["10001"]);
        book.set_client_status(x, ClientStatus::Inactive).unwrap();
        let y = add_client(&mut book, "Y", &[]);

        assert!(add_event(&mut book, y, "10001", "2024-03-15", "2024-03-15").is_ok());
    }

    #[test]
    fn event_for_unknown_client_is_rejected() {
        let mut book = TerritoryBook::default();
        let ghost = ClientId::new();
        assert_eq!(
            add_event(&mut book, ghost, "10001", "2024-03-15", "2024-03-15"),
            Err(CommitError::UnknownClient(ghost))
        );
    }

    #[test]
    fn conflicting_submission_aborts_by_default() {
        let mut book = TerritoryBook::default();
        let c = add_client(&mut book, "C", &["10001", "10002"]);
        add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15").unwrap();

        let err = add_event(&mut book, c, "10002", "2024-03-15", "2024-03-16").unwrap_err();
        match err {
            CommitError::SchedulingConflict { conflicts } => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].name, "Event 10001");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(book.events().len(), 1);
    }

    #[test]
    fn proceed_commits_and_records_conflicts_both_ways() {
        let mut book = TerritoryBook::default();
        let c = add_client(&mut book, "C", &["10001", "10002"]);
        let a = add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15")
            .unwrap()
            .id;

        let draft = EventDraft::new(c, "Second", code("10002"), range("2024-03-15", "2024-03-16"));
        let submission = book
            .submit_event(draft, &PlaceholderGeocoder::new(), ConflictPolicy::Proceed)
            .unwrap();
        assert_eq!(submission.conflicts.len(), 1);

        let b = submission.id;
        assert!(book.event(a).unwrap().conflicts.contains(&b));
        assert!(book.event(b).unwrap().conflicts.contains(&a));
        assert_eq!(book.statistics().conflict_pairs, 1);
        assert_eq!(book.conflict_pairs().len(), 1);
    }

    #[test]
    fn editing_an_event_does_not_conflict_with_itself() {
        let mut book = TerritoryBook::default();
        let c = add_client(&mut book, "C", &["10001"]);
        let id = add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15")
            .unwrap()
            .id;

        let mut draft = EventDraft::from_event(book.event(id).unwrap());
        draft.schedule = range("2024-03-15", "2024-03-17");
        draft.notes = "extended".to_string();
        let submission = book
            .submit_event(draft, &PlaceholderGeocoder::new(), ConflictPolicy::Abort)
            .unwrap();

        assert_eq!(submission.id, id);
        assert!(submission.conflicts.is_empty());
        assert_eq!(book.events().len(), 1);
        assert_eq!(book.event(id).unwrap().notes, "extended");
    }

    #[test]
    fn removing_client_cascades_to_events() {
        let mut book = TerritoryBook::default();
        let x = add_client(&mut book, "X", &["10001"]);
        let y = add_client(&mut book, "Y", &["10002"]);
        add_event(&mut book, x, "10001", "2024-03-15", "2024-03-15").unwrap();
        let draft = EventDraft::new(y, "Y event", code("10002"), range("2024-03-15", "2024-03-15"));
        let kept = book
            .submit_event(draft, &PlaceholderGeocoder::new(), ConflictPolicy::Proceed)
            .unwrap()
            .id;
        assert!(book.event(kept).unwrap().has_conflicts());

        let removal = book.remove_client(x).unwrap();
        assert_eq!(removal.client.name, "X");
        assert_eq!(removal.removed_events, 1);
        assert!(book.events_for_client(x).is_empty());
        assert!(!book.event(kept).unwrap().has_conflicts());
    }

    #[test]
    fn removing_event_clears_partner_conflicts() {
        let mut book = TerritoryBook::default();
        let c = add_client(&mut book, "C", &["10001"]);
        let a = add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15")
            .unwrap()
            .id;
        let draft = EventDraft::new(c, "B", code("10001"), range("2024-03-15", "2024-03-15"));
        let b = book
            .submit_event(draft, &PlaceholderGeocoder::new(), ConflictPolicy::Proceed)
            .unwrap()
            .id;

        book.remove_event(a).unwrap();
        assert!(book.event(b).unwrap().conflicts.is_empty());
        assert_eq!(book.remove_event(a), Err(CommitError::UnknownEvent(a)));
    }

    #[test]
    fn status_change_keeps_conflicts() {
        let mut book = TerritoryBook::default();
        let c = add_client(&mut book, "C", &["10001"]);
        let a = add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15")
            .unwrap()
            .id;
        let draft = EventDraft::new(c, "B", code("10001"), range("2024-03-15", "2024-03-15"));
        book.submit_event(draft, &PlaceholderGeocoder::new(), ConflictPolicy::Proceed)
            .unwrap();

        book.set_event_status(a, EventStatus::Cancelled).unwrap();
        assert_eq!(book.statistics().active_events, 1);
        assert_eq!(book.statistics().conflict_pairs, 1);
    }

    #[test]
    fn from_parts_discards_stale_conflicts() {
        let mut book = TerritoryBook::default();
        let c = add_client(&mut book, "C", &["10001"]);
        add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15").unwrap();
        let (clients, mut events) = book.into_parts();
        events[0].conflicts.insert(EventId::new());

        let book = TerritoryBook::from_parts(clients, events, ConflictRule::default());
        assert!(book.events()[0].conflicts.is_empty());
    }

    #[test]
    fn from_parts_drops_events_without_a_client() {
        let mut book = TerritoryBook::default();
        let c = add_client(&mut book, "C", &["10001"]);
        add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15").unwrap();
        let (_, events) = book.into_parts();

        let book = TerritoryBook::from_parts(Vec::new(), events, ConflictRule::default());
        assert!(book.events().is_empty());
        assert_eq!(book.statistics().active_events, 0);
    }

    #[test]
    fn deserialize_recomputes_and_keeps_rule() {
        let mut book = TerritoryBook::new(ConflictRule::with_radius(0.5));
        let c = add_client(&mut book, "C", &["10001"]);
        add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15").unwrap();

        let mut value = serde_json::to_value(&book).unwrap();
        value["events"][0]["conflicts"] =
            serde_json::json!([EventId::new(), EventId::new()]);

        let restored: TerritoryBook = serde_json::from_value(value).unwrap();
        assert_eq!(restored.rule(), ConflictRule::with_radius(0.5));
        assert!(restored.events()[0].conflicts.is_empty());
        assert_eq!(restored.statistics().conflict_pairs, 0);
        assert!(restored.conflict_pairs().is_empty());
    }

    #[test]
    fn narrower_rule_drops_conflicts() {
        let mut book = TerritoryBook::default();
        let c = add_client(&mut book, "C", &["10001", "10003"]);
        add_event(&mut book, c, "10001", "2024-03-15", "2024-03-15").unwrap();
        let draft = EventDraft::new(c, "Far", code("10003"), range("2024-03-15", "2024-03-15"));
        book.submit_event(draft, &PlaceholderGeocoder::new(), ConflictPolicy::Proceed)
            .unwrap();
        assert_eq!(book.statistics().conflict_pairs, 1);

        book.set_rule(ConflictRule::with_radius(0.5));
        assert_eq!(book.statistics().conflict_pairs, 0);
    }
}
