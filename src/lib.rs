// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod annotate;
pub mod calendar;
pub mod config;
pub mod event;
pub mod export;
pub mod fetch;

// Deduplication core (normalizer, similarity judge, bucket/calendar reducer)
pub mod reduce;

// ---- Re-exports for stable public API ----
pub use crate::calendar::{Calendar, CalendarFilter};
pub use crate::config::CalendarConfig;
pub use crate::event::{CalendarError, Event, Impact};
pub use crate::fetch::{CalendarSource, FmpClient};
pub use crate::reduce::{normalize_title, reduce_bucket, reduce_calendar, same_event};
