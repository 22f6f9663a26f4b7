//! Calendar engine for the bidboard planning dashboard.
//!
//! This crate contains the pieces of bidboard with real invariants:
//! - `dates`: normalization of loosely formatted date text into local
//!   calendar dates
//! - `milestones` + `merge`: derivation of calendar events from project
//!   records and deterministic same-day merging of bid/RFI/pre-bid deadlines
//! - `filter`: the staged category filter pipeline with persisted toggle state
//! - `store`: the tiered persistence gateway (remote-first with a local
//!   fallback store, per-user ownership enforcement)
//!
//! Everything here is UI-agnostic; the `bidboard` CLI is one consumer.

pub mod dates;
pub mod error;
pub mod event;
pub mod filter;
pub mod merge;
pub mod milestones;
pub mod prefs;
pub mod project;
pub mod store;

pub use error::{CalendarError, CalendarResult};
pub use event::{CalendarEvent, EventCategory, EventDraft, EventPatch, MILESTONE_ID_PREFIX};
pub use filter::{CategoryFilterState, GroupFilter, filter_events};
pub use project::ProjectRecord;
