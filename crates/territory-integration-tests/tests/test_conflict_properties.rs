//! # Conflict Engine Properties
//!
//! Property tests over random event sets: the conflict relation is symmetric
//! and irreflexive, recomputation is idempotent, the pre-insert check agrees
//! with a full recompute, and statistics count each pair once.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use territory_core::{ClientId, DateRange, Event, EventId, EventStatus, PostalCode};
use territory_engine::{
    compute_conflicts, conflict_pairs, would_conflict, CandidateEvent, ConflictRule, Statistics,
};
use territory_geo::{distance_miles, resolve};

fn arb_event() -> impl Strategy<Value = Event> {
    (
        "[0-9]{5}",
        0u64..90,
        0u64..7,
        prop_oneof![
            Just(EventStatus::Active),
            Just(EventStatus::Completed),
            Just(EventStatus::Cancelled),
        ],
    )
        .prop_map(|(zip, offset, len, status)| {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset);
            Event {
                id: EventId::new(),
                client_id: ClientId::new(),
                name: format!("Event {zip}"),
                coordinate: resolve(&zip),
                postal_code: PostalCode::new(&zip).unwrap(),
                address: None,
                schedule: DateRange::new(start, start + Days::new(len)).unwrap(),
                status,
                notes: String::new(),
                conflicts: BTreeSet::new(),
            }
        })
}

fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    proptest::collection::vec(arb_event(), 0..40)
}

proptest! {
    #[test]
    fn relation_is_symmetric_and_irreflexive(events in arb_events()) {
        let events = compute_conflicts(events);
        for a in &events {
            prop_assert!(!a.conflicts.contains(&a.id));
            for id in &a.conflicts {
                let b = events.iter().find(|e| e.id == *id).unwrap();
                prop_assert!(b.conflicts.contains(&a.id));
            }
        }
    }

    #[test]
    fn every_recorded_conflict_satisfies_the_rule(events in arb_events()) {
        let events = compute_conflicts(events);
        for a in &events {
            for id in &a.conflicts {
                let b = events.iter().find(|e| e.id == *id).unwrap();
                prop_assert!(a.schedule.start() <= b.schedule.end());
                prop_assert!(a.schedule.end() >= b.schedule.start());
                prop_assert!(distance_miles(a.coordinate, b.coordinate) <= 15.0);
            }
        }
    }

    #[test]
    fn recompute_is_idempotent(events in arb_events()) {
        let once = compute_conflicts(events);
        let twice = compute_conflicts(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn pre_insert_check_matches_recompute(existing in arb_events(), candidate in arb_event()) {
        let predicted: BTreeSet<EventId> = would_conflict(
            &CandidateEvent {
                id: None,
                coordinate: Some(candidate.coordinate),
                schedule: Some(candidate.schedule),
            },
            &existing,
        )
        .into_iter()
        .collect();

        let candidate_id = candidate.id;
        let mut all = existing;
        all.push(candidate);
        let all = compute_conflicts(all);
        let actual = &all.iter().find(|e| e.id == candidate_id).unwrap().conflicts;
        prop_assert_eq!(&predicted, actual);
    }

    #[test]
    fn statistics_count_each_pair_once(events in arb_events()) {
        let events = compute_conflicts(events);
        let stats = Statistics::compute(&events, &[]);
        prop_assert_eq!(stats.conflict_pairs, conflict_pairs(&events).len());
    }

    #[test]
    fn wider_radius_never_removes_conflicts(events in arb_events()) {
        let narrow = ConflictRule::with_radius(5.0).compute_conflicts(events.clone());
        let wide = ConflictRule::with_radius(50.0).compute_conflicts(events);
        for (n, w) in narrow.iter().zip(&wide) {
            prop_assert!(n.conflicts.is_subset(&w.conflicts));
        }
    }
}
