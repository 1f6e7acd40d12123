//! Core types for calgrid.
//!
//! This crate holds everything with rules in it:
//! - `Event` and its category/recurrence tags
//! - `conflict` for closed-interval overlap detection
//! - `store` for the add/update/delete protocol around a list of events
//! - `persistence` for loading and saving that list
//!
//! Rendering and argument parsing live in the `calgrid` binary.

pub mod config;
pub mod conflict;
pub mod date_range;
pub mod error;
pub mod event;
pub mod filter;
pub mod persistence;
pub mod store;

pub use error::{CalGridError, CalGridResult};
pub use event::{Category, Event, Recurrence};
pub use store::{Conflict, EventStore, Outcome, StoreState};
