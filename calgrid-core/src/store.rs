//! The event store.
//!
//! `EventStore` owns the authoritative list of events. Every change is run
//! through the conflict checker first; a change that passes is applied,
//! the full list is handed to the gateway, and the error slot is cleared.
//! A change that fails leaves the list exactly as it was and fills the
//! error slot.
//!
//! Saving is log-and-continue: if the gateway fails, the change stays in
//! memory and the failure is reported through `tracing` only.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::conflict::conflicts_with;
use crate::event::Event;
use crate::persistence::PersistenceGateway;

/// Message placed in the error slot when a change is refused.
pub const CONFLICT_MESSAGE: &str = "Event conflicts with existing events";

/// A change refused because the event would overlap another one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Event conflicts with existing events")]
pub struct Conflict {
    /// Id of the event that was being added or updated
    pub event_id: String,
    /// Id of the first stored event it overlaps
    pub conflicting_id: String,
}

/// What a successful operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Updated,
    Deleted,
    /// Nothing matched the id; the list was left alone
    Unchanged,
}

/// Everything the store holds.
///
/// Only `events` is persisted; the other two fields are for whoever is
/// presenting the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub events: Vec<Event>,
    pub selected_event: Option<Event>,
    pub error: Option<String>,
}

pub struct EventStore<G> {
    gateway: G,
    state: StoreState,
}

impl<G: PersistenceGateway> EventStore<G> {
    /// Create a store holding whatever the gateway has saved.
    ///
    /// Unreadable storage hydrates as an empty list.
    pub fn open(gateway: G) -> Self {
        let events = match gateway.load() {
            Ok(events) => {
                info!(count = events.len(), "loaded events");
                events
            }
            Err(e) => {
                warn!(error = %e, "could not load events, starting empty");
                Vec::new()
            }
        };

        EventStore {
            gateway,
            state: StoreState {
                events,
                ..StoreState::default()
            },
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.state.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.state.events.iter().find(|e| e.id == id)
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.state.selected_event.as_ref()
    }

    /// Message from the last refused change, until something clears it
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append `event` unless it overlaps a stored event.
    ///
    /// The id is expected to be new; a duplicate id is not checked for.
    pub fn add(&mut self, event: Event) -> Result<Outcome, Conflict> {
        self.check(&event)?;

        debug!(id = %event.id, title = %event.title, "adding event");
        self.state.events.push(event);
        self.commit();
        Ok(Outcome::Added)
    }

    /// Replace the stored event with the same id, in place.
    ///
    /// The new values are checked against every other event. An unknown id
    /// is a no-op and does not touch the error slot.
    pub fn update(&mut self, event: Event) -> Result<Outcome, Conflict> {
        let Some(index) = self.position(&event.id) else {
            debug!(id = %event.id, "update of unknown event ignored");
            return Ok(Outcome::Unchanged);
        };

        self.check(&event)?;

        debug!(id = %event.id, "updating event");
        self.state.events[index] = event;
        self.commit();
        Ok(Outcome::Updated)
    }

    /// Move an event so it starts at `start`, keeping its duration.
    ///
    /// A move whose end would fall outside the representable time range is
    /// ignored like an unknown id.
    pub fn reschedule(&mut self, id: &str, start: DateTime<Utc>) -> Result<Outcome, Conflict> {
        let Some(event) = self.get(id) else {
            return Ok(Outcome::Unchanged);
        };

        match event.moved_to(start) {
            Some(moved) => self.update(moved),
            None => {
                warn!(id, %start, "reschedule out of range ignored");
                Ok(Outcome::Unchanged)
            }
        }
    }

    /// Remove the event with `id`, if any.
    ///
    /// The list is saved and the error slot cleared either way.
    pub fn delete(&mut self, id: &str) -> Outcome {
        let before = self.state.events.len();
        self.state.events.retain(|e| e.id != id);
        let removed = self.state.events.len() != before;

        debug!(id, removed, "deleting event");
        self.commit();

        if removed {
            Outcome::Deleted
        } else {
            Outcome::Unchanged
        }
    }

    // =========================================================================
    // Selection and error slot
    // =========================================================================

    pub fn select_event(&mut self, event: Event) {
        self.state.selected_event = Some(event);
        self.state.error = None;
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_event = None;
        self.state.error = None;
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn position(&self, id: &str) -> Option<usize> {
        self.state.events.iter().position(|e| e.id == id)
    }

    fn check(&mut self, candidate: &Event) -> Result<(), Conflict> {
        let Some(existing) = conflicts_with(&self.state.events, candidate) else {
            return Ok(());
        };

        let conflict = Conflict {
            event_id: candidate.id.clone(),
            conflicting_id: existing.id.clone(),
        };

        debug!(
            id = %conflict.event_id,
            conflicting_id = %conflict.conflicting_id,
            "change refused"
        );
        self.state.error = Some(CONFLICT_MESSAGE.to_string());
        Err(conflict)
    }

    fn commit(&mut self) {
        if let Err(e) = self.gateway.save(&self.state.events) {
            warn!(error = %e, "could not save events; changes are kept in memory only");
        }
        self.state.error = None;
    }
}
