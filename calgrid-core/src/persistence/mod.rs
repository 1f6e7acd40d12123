//! Durable storage for the event collection.
//!
//! The store hands the whole collection to a [`PersistenceGateway`] after
//! every successful change and reads it back once at startup. Gateways are
//! key-value shaped: the collection lives under a single fixed key,
//! [`STORAGE_KEY`], encoded as a JSON array.

mod file;
mod memory;

pub use file::FileGateway;
pub use memory::MemoryGateway;

use crate::error::{CalGridError, CalGridResult};
use crate::event::Event;

/// Key the event collection is stored under.
pub const STORAGE_KEY: &str = "calendarEvents";

/// Load/save access to wherever the collection is kept.
pub trait PersistenceGateway {
    /// Read the saved collection. A gateway with nothing stored returns an
    /// empty collection rather than an error.
    fn load(&self) -> CalGridResult<Vec<Event>>;

    /// Replace the saved collection with `events`.
    fn save(&self, events: &[Event]) -> CalGridResult<()>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn load(&self) -> CalGridResult<Vec<Event>> {
        (**self).load()
    }

    fn save(&self, events: &[Event]) -> CalGridResult<()> {
        (**self).save(events)
    }
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for Box<G> {
    fn load(&self) -> CalGridResult<Vec<Event>> {
        (**self).load()
    }

    fn save(&self, events: &[Event]) -> CalGridResult<()> {
        (**self).save(events)
    }
}

/// Encode a collection the way gateways store it.
pub fn encode(events: &[Event]) -> CalGridResult<String> {
    serde_json::to_string_pretty(events).map_err(|e| CalGridError::Serialization(e.to_string()))
}

/// Decode a stored collection. Blank input decodes as empty.
pub fn decode(content: &str) -> CalGridResult<Vec<Event>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content).map_err(|e| CalGridError::Serialization(e.to_string()))
}
