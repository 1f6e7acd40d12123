//! Search and category filtering over an event list.

use crate::event::{Category, Event};

/// Text search plus an optional category.
///
/// An event matches when its title or description contains the query
/// (case-insensitive) and its category equals the requested one. Missing
/// criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub query: Option<String>,
    pub category: Option<Category>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.matches_query(event) && self.category.is_none_or(|c| c == event.category)
    }

    /// Matching events, in their original order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }

    fn matches_query(&self, event: &Event) -> bool {
        let query = match self.query.as_deref() {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };

        event.title.to_lowercase().contains(&query)
            || event.description.to_lowercase().contains(&query)
    }
}
