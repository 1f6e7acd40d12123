use anyhow::Result;
use calgrid_core::persistence::PersistenceGateway;
use calgrid_core::store::{EventStore, Outcome};
use calgrid_core::Event;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

use super::conflict_error;
use crate::datetime::{When, parse_when};

pub fn run<G: PersistenceGateway>(store: &mut EventStore<G>, id: &str, to: &str) -> Result<()> {
    let Some(event) = store.get(id) else {
        anyhow::bail!("No event with id '{}'", id);
    };

    let start = target_start(event, parse_when(to)?);
    if event.moved_to(start).is_none() {
        anyhow::bail!("Cannot move '{}' to {}: the end would be out of range", event.title, to);
    }

    match store.reschedule(id, start) {
        Ok(Outcome::Updated) => {
            let moved = store.get(id).map(|e| e.start).unwrap_or(start);
            println!(
                "{}",
                format!("Moved to {}", moved.format("%Y-%m-%d %H:%M")).green()
            );
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(conflict) => Err(conflict_error(store, &conflict)),
    }
}

/// A bare day keeps the event's time of day; a full date/time is used as is.
fn target_start(event: &Event, when: When) -> DateTime<Utc> {
    match when {
        When::At(dt) => dt,
        When::Day(day) => day.and_time(event.start.time()).and_utc(),
    }
}
