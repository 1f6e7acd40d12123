//! In-process gateway, used by tests and when nothing should touch disk.

use std::cell::{Cell, RefCell};

use super::{PersistenceGateway, decode, encode};
use crate::error::{CalGridError, CalGridResult};
use crate::event::Event;

/// Keeps the encoded document in memory.
///
/// The collection goes through the same JSON encoding as the file gateway,
/// so a load after a save sees exactly what a fresh process would.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    document: RefCell<Option<String>>,
    saves: Cell<usize>,
    failing: Cell<bool>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose stored document is `content`, valid or not.
    pub fn with_document(content: impl Into<String>) -> Self {
        MemoryGateway {
            document: RefCell::new(Some(content.into())),
            ..Self::default()
        }
    }

    /// The stored document, if anything was ever saved
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> CalGridResult<Vec<Event>> {
        match self.document.borrow().as_deref() {
            Some(content) => decode(content),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, events: &[Event]) -> CalGridResult<()> {
        if self.failing.get() {
            return Err(CalGridError::Storage("storage unavailable".into()));
        }

        *self.document.borrow_mut() = Some(encode(events)?);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
