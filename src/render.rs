//! Terminal formatting for events.

use calgrid_core::Event;
use chrono::{NaiveDate, Utc};
use owo_colors::OwoColorize;

/// One-line summary: `  09:00-10:00 Title [category]`
pub fn event_line(event: &Event) -> String {
    format!(
        "  {} {} {}",
        time_span(event),
        event.title,
        category_tag(event)
    )
}

/// Multi-line view of every field.
pub fn event_details(event: &Event) -> String {
    let mut lines = vec![
        format!("{}", event.title.bold()),
        format!("  {:<12}{}", "id", event.id.dimmed()),
        format!("  {:<12}{}", "start", event.start.format("%Y-%m-%d %H:%M")),
        format!("  {:<12}{}", "end", event.end.format("%Y-%m-%d %H:%M")),
        format!("  {:<12}{}", "category", category_tag(event)),
        format!("  {:<12}{}", "recurrence", event.recurrence),
    ];

    if !event.description.is_empty() {
        lines.push(format!("  {:<12}{}", "description", event.description));
    }

    lines.join("\n")
}

/// Day heading, e.g. "Today", "Tomorrow" or "Wed Feb 25"
///
/// Days are UTC days, like the month grid.
pub fn date_label(date: NaiveDate) -> String {
    let today = Utc::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

fn time_span(event: &Event) -> String {
    if event.start.date_naive() == event.end.date_naive() {
        format!("{}-{}", event.start.format("%H:%M"), event.end.format("%H:%M"))
    } else {
        format!(
            "{}-{}",
            event.start.format("%H:%M"),
            event.end.format("%b %-d %H:%M")
        )
    }
}

fn category_tag(event: &Event) -> String {
    let tag = format!("[{}]", event.category.label());

    match parse_hex_color(&event.color) {
        Some((r, g, b)) => tag.truecolor(r, g, b).to_string(),
        None => tag.dimmed().to_string(),
    }
}

/// Parse `#rrggbb`
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1976d2"), Some((0x19, 0x76, 0xd2)));
        assert_eq!(parse_hex_color("1976d2"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_time_span_same_day_and_overnight() {
        let event = Event::new(
            "Standup",
            Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 20, 9, 15, 0).unwrap(),
        );
        assert_eq!(time_span(&event), "09:00-09:15");

        let overnight = event
            .moved_to(Utc.with_ymd_and_hms(2025, 3, 20, 23, 50, 0).unwrap())
            .unwrap();
        assert_eq!(time_span(&overnight), "23:50-Mar 21 00:05");
    }

    #[test]
    fn test_event_details_lists_description_only_when_present() {
        let event = Event::new(
            "Standup",
            Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 20, 9, 15, 0).unwrap(),
        );
        assert!(!event_details(&event).contains("description"));

        let event = event.with_description("Daily sync");
        assert!(event_details(&event).contains("Daily sync"));
    }

    #[test]
    fn test_date_label_uses_utc_today() {
        let today = Utc::now().date_naive();

        assert_eq!(date_label(today), "Today");
        assert_eq!(date_label(today + Duration::days(1)), "Tomorrow");
        assert_eq!(
            date_label(NaiveDate::from_ymd_opt(2025, 2, 26).unwrap()),
            "Wed Feb 26"
        );
    }
}
