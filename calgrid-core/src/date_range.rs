//! Date ranges for a month grid.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

use crate::event::Event;

/// Half-open range `[from, to)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// The whole of `date`.
    pub fn day(date: NaiveDate) -> Option<Self> {
        let next = date.checked_add_days(Days::new(1))?;
        Some(DateRange {
            from: start_of(date),
            to: start_of(next),
        })
    }

    /// The whole of the given month, or None for an invalid month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = first.checked_add_months(chrono::Months::new(1))?;
        Some(DateRange {
            from: start_of(first),
            to: start_of(next),
        })
    }

    /// Parse `YYYY-MM` into a month range.
    pub fn parse_month(s: &str) -> Result<Self, String> {
        let invalid = || format!("Invalid month '{}'. Expected YYYY-MM", s);

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::month(year, month).ok_or_else(invalid)
    }

    /// Month containing `date`.
    pub fn month_of(date: NaiveDate) -> Option<Self> {
        Self::month(date.year(), date.month())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant < self.to
    }

    /// Whether the event starts inside this range.
    pub fn starts_within(&self, event: &Event) -> bool {
        self.contains(event.start)
    }

    /// Events starting inside this range, ordered by start.
    pub fn events<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        let mut found: Vec<&Event> = events.iter().filter(|e| self.starts_within(e)).collect();
        found.sort_by_key(|e| e.start);
        found
    }

    /// Every calendar day in the range.
    pub fn days(&self) -> Vec<NaiveDate> {
        let last = self.to.date_naive();
        self.from
            .date_naive()
            .iter_days()
            .take_while(|d| *d < last)
            .collect()
    }
}

/// Every day of a month, the cells of a month grid.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    DateRange::month(year, month)
        .map(|range| range.days())
        .unwrap_or_default()
}

/// Events starting on `date`, ordered by start.
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    DateRange::day(date)
        .map(|range| range.events(events))
        .unwrap_or_default()
}

fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
