use anyhow::{Result, anyhow};
use calgrid_core::persistence::PersistenceGateway;
use calgrid_core::store::EventStore;
use calgrid_core::{Category, Event, Recurrence};
use chrono::Duration;
use clap::Args;
use owo_colors::OwoColorize;

use super::conflict_error;
use crate::datetime::parse_datetime;

/// Length of an event created without `--end` or `--duration`
const DEFAULT_DURATION_MINUTES: i64 = 60;

#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Event title
    pub title: String,

    /// Start date/time (e.g. "2025-03-20T15:00")
    #[arg(short, long)]
    pub start: String,

    /// End date/time
    #[arg(short, long, conflicts_with = "duration")]
    pub end: Option<String>,

    /// Duration in minutes
    #[arg(short, long, conflicts_with = "end")]
    pub duration: Option<i64>,

    /// Event description
    #[arg(long)]
    pub description: Option<String>,

    /// meeting, task, reminder, personal or other
    #[arg(short, long)]
    pub category: Option<Category>,

    /// none, daily, weekly, monthly or custom
    #[arg(short, long)]
    pub recurrence: Option<Recurrence>,
}

pub fn run<G: PersistenceGateway>(
    store: &mut EventStore<G>,
    args: AddArgs,
    default_category: Category,
) -> Result<()> {
    let event = build_event(args, default_category)?;

    if let Err(conflict) = store.add(event.clone()) {
        return Err(conflict_error(store, &conflict));
    }

    println!("{}", format!("Created: {}", event.title).green());
    println!("  {}", event.id.dimmed());
    Ok(())
}

fn build_event(args: AddArgs, default_category: Category) -> Result<Event> {
    let title = args.title.trim();
    if title.is_empty() {
        anyhow::bail!("Title must not be empty");
    }

    let start = parse_datetime(&args.start)?;
    let end = match (args.end, args.duration) {
        (Some(end), _) => parse_datetime(&end)?,
        (None, minutes) => {
            let minutes = minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
            let duration = Duration::try_minutes(minutes)
                .ok_or_else(|| anyhow!("Duration of {} minutes is too long", minutes))?;
            start
                .checked_add_signed(duration)
                .ok_or_else(|| anyhow!("End time would be out of range"))?
        }
    };

    Ok(Event::new(title, start, end)
        .with_description(args.description.unwrap_or_default())
        .with_category(args.category.unwrap_or(default_category))
        .with_recurrence(args.recurrence.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calgrid_core::persistence::MemoryGateway;
    use chrono::{TimeZone, Utc};

    fn args(title: &str, start: &str) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            start: start.to_string(),
            ..AddArgs::default()
        }
    }

    #[test]
    fn test_default_end_is_one_hour_later() {
        let event = build_event(args("Lunch", "2024-01-01T12:00"), Category::Other).unwrap();
        assert_eq!(event.end, Utc.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_duration_and_tags() {
        let event = build_event(
            AddArgs {
                duration: Some(15),
                category: Some(Category::Reminder),
                recurrence: Some(Recurrence::Daily),
                description: Some("meds".into()),
                ..args("Pills", "2024-01-01T08:00")
            },
            Category::Other,
        )
        .unwrap();

        assert_eq!(event.end, Utc.with_ymd_and_hms(2024, 1, 1, 8, 15, 0).unwrap());
        assert_eq!(event.category, Category::Reminder);
        assert_eq!(event.color, Category::Reminder.color());
        assert_eq!(event.recurrence, Recurrence::Daily);
        assert_eq!(event.description, "meds");
    }

    #[test]
    fn test_configured_default_category_applies() {
        let event = build_event(args("Sync", "2024-01-01T08:00"), Category::Meeting).unwrap();
        assert_eq!(event.category, Category::Meeting);
    }

    #[test]
    fn test_huge_duration_is_rejected() {
        let result = build_event(
            AddArgs {
                duration: Some(i64::MAX),
                ..args("Forever", "2024-01-01T08:00")
            },
            Category::Other,
        );

        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_default_end_past_max_time_is_rejected() {
        let result = build_event(args("Late", "+262142-12-31T23:30"), Category::Other);
        assert!(result.unwrap_err().to_string().contains("out of range"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        assert!(build_event(args("   ", "2024-01-01T08:00"), Category::Other).is_err());
    }

    #[test]
    fn test_conflicting_add_reports_error() {
        let mut store = EventStore::open(MemoryGateway::new());
        run(&mut store, args("First", "2024-01-01T09:00"), Category::Other).unwrap();

        let err = run(&mut store, args("Second", "2024-01-01T09:30"), Category::Other)
            .unwrap_err()
            .to_string();

        assert!(err.starts_with("Event conflicts with existing events"));
        assert!(err.contains("\"First\""));
        assert_eq!(store.events().len(), 1);
    }
}
