pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod reschedule;
pub mod show;

use calgrid_core::persistence::PersistenceGateway;
use calgrid_core::store::{CONFLICT_MESSAGE, Conflict, EventStore};

/// Turn a refused change into a message naming the event in the way.
pub(crate) fn conflict_error<G: PersistenceGateway>(
    store: &EventStore<G>,
    conflict: &Conflict,
) -> anyhow::Error {
    let message = store.error().unwrap_or(CONFLICT_MESSAGE);

    match store.get(&conflict.conflicting_id) {
        Some(other) => anyhow::anyhow!(
            "{}: overlaps \"{}\" ({} - {})",
            message,
            other.title,
            other.start.format("%Y-%m-%d %H:%M"),
            other.end.format("%Y-%m-%d %H:%M")
        ),
        None => anyhow::anyhow!("{}", message),
    }
}
