//! Interval conflict detection.
//!
//! Two events conflict when their time intervals overlap with closed
//! endpoints, so an event ending at 10:00 conflicts with one starting at
//! 10:00. An event never conflicts with another event carrying its own id,
//! which lets an update be checked against the collection it replaces.

use chrono::{DateTime, Utc};

use crate::event::Event;

/// Whether `candidate` overlaps any event in `existing` other than itself.
pub fn has_conflict(existing: &[Event], candidate: &Event) -> bool {
    conflicts_with(existing, candidate).is_some()
}

/// The first event in `existing` that `candidate` overlaps, skipping any
/// event with the candidate's id.
pub fn conflicts_with<'a>(existing: &'a [Event], candidate: &Event) -> Option<&'a Event> {
    existing
        .iter()
        .filter(|event| event.id != candidate.id)
        .find(|event| overlaps(event, candidate))
}

/// Closed-interval overlap between an existing event and a candidate.
pub fn overlaps(existing: &Event, candidate: &Event) -> bool {
    within(candidate.start, existing.start, existing.end)
        || within(candidate.end, existing.start, existing.end)
        || within(existing.start, candidate.start, candidate.end)
}

// Inverted intervals contain nothing.
fn within(instant: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start <= instant && instant <= end
}
