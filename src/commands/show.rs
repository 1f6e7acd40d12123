use anyhow::Result;
use calgrid_core::persistence::PersistenceGateway;
use calgrid_core::store::EventStore;

use crate::render;

pub fn run<G: PersistenceGateway>(store: &mut EventStore<G>, id: &str, json: bool) -> Result<()> {
    let Some(event) = store.get(id).cloned() else {
        anyhow::bail!("No event with id '{}'", id);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        println!("{}", render::event_details(&event));
    }

    store.select_event(event);

    Ok(())
}
