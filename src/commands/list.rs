use anyhow::Result;
use calgrid_core::date_range::{DateRange, events_on};
use calgrid_core::filter::EventFilter;
use calgrid_core::persistence::PersistenceGateway;
use calgrid_core::store::EventStore;
use calgrid_core::{Category, Event};
use chrono::Utc;
use owo_colors::OwoColorize;

use crate::render;

pub fn run<G: PersistenceGateway>(
    store: &EventStore<G>,
    month: Option<&str>,
    search: Option<String>,
    category: Option<Category>,
    json: bool,
) -> Result<()> {
    let range = match month {
        Some(m) => DateRange::parse_month(m).map_err(|e| anyhow::anyhow!(e))?,
        None => DateRange::month_of(Utc::now().date_naive())
            .ok_or_else(|| anyhow::anyhow!("Could not determine the current month"))?,
    };

    let filter = EventFilter { query: search, category };
    let matching: Vec<Event> = filter.apply(store.events()).into_iter().cloned().collect();

    if json {
        let in_month: Vec<&Event> = range.events(&matching);
        println!("{}", serde_json::to_string_pretty(&in_month)?);
        return Ok(());
    }

    println!("{}", range.from.format("%B %Y").to_string().bold());

    let days = month_grid(&range, &matching);
    if days.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, (label, events)) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", label.bold());
        for event in events {
            println!("{}", render::event_line(event));
        }
    }

    Ok(())
}

/// Non-empty cells of the month grid: day label plus that day's events.
fn month_grid<'a>(range: &DateRange, events: &'a [Event]) -> Vec<(String, Vec<&'a Event>)> {
    range
        .days()
        .into_iter()
        .map(|day| (render::date_label(day), events_on(events, day)))
        .filter(|(_, events)| !events.is_empty())
        .collect()
}
