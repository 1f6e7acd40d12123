use anyhow::Result;
use calgrid_core::persistence::PersistenceGateway;
use calgrid_core::store::EventStore;
use calgrid_core::{Category, Event, Recurrence};
use clap::Args;
use owo_colors::OwoColorize;

use super::conflict_error;
use crate::datetime::parse_datetime;

#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    /// Event id
    pub id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New start date/time
    #[arg(short, long)]
    pub start: Option<String>,

    /// New end date/time
    #[arg(short, long)]
    pub end: Option<String>,

    /// New description (empty string clears it)
    #[arg(long)]
    pub description: Option<String>,

    /// New category; also resets the color
    #[arg(short, long)]
    pub category: Option<Category>,

    /// New recurrence tag
    #[arg(short, long)]
    pub recurrence: Option<Recurrence>,
}

pub fn run<G: PersistenceGateway>(store: &mut EventStore<G>, args: EditArgs) -> Result<()> {
    let Some(existing) = store.get(&args.id) else {
        anyhow::bail!("No event with id '{}'", args.id);
    };

    let updated = apply_changes(existing.clone(), args)?;

    if let Err(conflict) = store.update(updated.clone()) {
        return Err(conflict_error(store, &conflict));
    }

    println!("{}", format!("Updated: {}", updated.title).green());
    Ok(())
}

fn apply_changes(mut event: Event, args: EditArgs) -> Result<Event> {
    if let Some(title) = args.title {
        let title = title.trim();
        if title.is_empty() {
            anyhow::bail!("Title must not be empty");
        }
        event.title = title.to_string();
    }
    if let Some(start) = args.start {
        event.start = parse_datetime(&start)?;
    }
    if let Some(end) = args.end {
        event.end = parse_datetime(&end)?;
    }
    if let Some(description) = args.description {
        event.description = description;
    }
    if let Some(category) = args.category {
        event.set_category(category);
    }
    if let Some(recurrence) = args.recurrence {
        event.recurrence = recurrence;
    }
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::persistence::MemoryGateway;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    fn seeded_store() -> EventStore<MemoryGateway> {
        let mut store = EventStore::open(MemoryGateway::new());
        store.add(Event::new("Morning", at(9), at(10)).with_id("m")).unwrap();
        store.add(Event::new("Afternoon", at(14), at(15)).with_id("a")).unwrap();
        store
    }

    fn edit(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            ..EditArgs::default()
        }
    }

    #[test]
    fn test_edit_changes_only_given_fields() {
        let mut store = seeded_store();

        run(
            &mut store,
            EditArgs {
                title: Some("Late morning".into()),
                category: Some(Category::Task),
                ..edit("m")
            },
        )
        .unwrap();

        let event = store.get("m").unwrap();
        assert_eq!(event.title, "Late morning");
        assert_eq!(event.category, Category::Task);
        assert_eq!(event.color, Category::Task.color());
        assert_eq!(event.start, at(9));
        assert_eq!(store.events()[0].id, "m");
    }

    #[test]
    fn test_edit_into_conflict_keeps_event() {
        let mut store = seeded_store();

        let result = run(
            &mut store,
            EditArgs {
                end: Some("2024-01-01T14:30".into()),
                ..edit("m")
            },
        );

        assert!(result.is_err());
        assert_eq!(store.get("m").unwrap().end, at(10));
        assert!(store.error().is_some());
    }

    #[test]
    fn test_edit_unknown_id() {
        let mut store = seeded_store();
        assert!(run(&mut store, edit("zzz")).is_err());
        assert_eq!(store.error(), None);
    }
}
