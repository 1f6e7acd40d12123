//! Calendar event types.
//!
//! An `Event` is a closed time interval with display metadata attached.
//! Only `id`, `start` and `end` take part in scheduling rules; the rest is
//! carried for the front end and for storage.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EventRecord")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Stored only, never expanded into occurrences
    pub recurrence: Recurrence,
    pub category: Category,
    /// Display color, derived from `category` when the event is built
    pub color: String,
}

impl Event {
    /// Build a new event with a fresh id.
    ///
    /// `start <= end` is the caller's responsibility.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let category = Category::default();
        Event {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            start,
            end,
            recurrence: Recurrence::default(),
            category,
            color: category.color().to_string(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category and the color that goes with it.
    pub fn with_category(mut self, category: Category) -> Self {
        self.set_category(category);
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.color = category.color().to_string();
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Copy of this event starting at `start`, keeping the same duration.
    ///
    /// Returns `None` when the new end falls outside the representable range.
    pub fn moved_to(&self, start: DateTime<Utc>) -> Option<Event> {
        let end = start.checked_add_signed(self.duration())?;

        Some(Event {
            start,
            end,
            ..self.clone()
        })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}

/// On-disk shape of an event. Older records may lack the tag fields.
#[derive(Deserialize)]
struct EventRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default)]
    recurrence: Recurrence,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    color: Option<String>,
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        let color = record
            .color
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| record.category.color().to_string());

        Event {
            id: record.id,
            title: record.title,
            description: record.description,
            start: record.start,
            end: record.end,
            recurrence: record.recurrence,
            category: record.category,
            color,
        }
    }
}

/// Event category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meeting,
    Task,
    Reminder,
    Personal,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Meeting,
        Category::Task,
        Category::Reminder,
        Category::Personal,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Meeting => "meeting",
            Category::Task => "task",
            Category::Reminder => "reminder",
            Category::Personal => "personal",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Meeting => "Meeting",
            Category::Task => "Task",
            Category::Reminder => "Reminder",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }

    /// Hex display color for this category
    pub fn color(&self) -> &'static str {
        match self {
            Category::Meeting => "#1976d2",
            Category::Task => "#2e7d32",
            Category::Reminder => "#ed6c02",
            Category::Personal => "#9c27b0",
            Category::Other => "#757575",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown category '{}'. Expected one of: {}", s, names.join(", "))
            })
    }
}

/// Repeat pattern tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl Recurrence {
    pub const ALL: [Recurrence; 5] = [
        Recurrence::None,
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Monthly,
        Recurrence::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Custom => "custom",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recurrence::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Recurrence::ALL.iter().map(|r| r.as_str()).collect();
                format!("Unknown recurrence '{}'. Expected one of: {}", s, names.join(", "))
            })
    }
}
