use anyhow::Result;
use calgrid_core::persistence::PersistenceGateway;
use calgrid_core::store::{EventStore, Outcome};
use owo_colors::OwoColorize;

pub fn run<G: PersistenceGateway>(store: &mut EventStore<G>, id: &str) -> Result<()> {
    let title = store.get(id).map(|e| e.title.clone());

    match (store.delete(id), title) {
        (Outcome::Deleted, Some(title)) => println!("{}", format!("Deleted: {}", title).red()),
        _ => println!("{}", format!("No event with id '{}'", id).dimmed()),
    }

    Ok(())
}
