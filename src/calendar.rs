// src/calendar.rs
//! `Calendar` — the owning facade over a fetched set of events.
//!
//! Holds the rows plus the display offset they are anchored to, and exposes
//! the processing passes (filter, title refactor, reduction, annotation)
//! and the export formats.

use anyhow::Result;
use chrono::{FixedOffset, NaiveDate};
use tracing::info;

use crate::annotate;
use crate::event::{Event, Impact};
use crate::export;
use crate::fetch::CalendarSource;
use crate::reduce;

/// Membership filter over the string/enum columns. Empty filter matches
/// everything; each populated field narrows by set membership.
#[derive(Debug, Default, Clone)]
pub struct CalendarFilter {
    country: Option<Vec<String>>,
    currency: Option<Vec<String>>,
    event: Option<Vec<String>>,
    impact: Option<Vec<Impact>>,
}

impl CalendarFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.country = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn currency<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currency = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn event<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn impact<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Impact>,
    {
        self.impact = Some(values.into_iter().collect());
        self
    }

    fn matches(&self, ev: &Event) -> bool {
        let in_list = |list: &Option<Vec<String>>, value: &str| {
            list.as_ref().map_or(true, |l| l.iter().any(|v| v == value))
        };
        in_list(&self.country, &ev.country)
            && in_list(&self.currency, &ev.currency)
            && in_list(&self.event, &ev.event)
            && self
                .impact
                .as_ref()
                .map_or(true, |l| l.contains(&ev.impact))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    events: Vec<Event>,
    tz: FixedOffset,
}

impl Calendar {
    /// Wrap already-fetched events, keeping their timestamps as-is (UTC
    /// display).
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            tz: FixedOffset::east_opt(0).unwrap(),
        }
    }

    /// Wrap events and re-anchor every timestamp to `tz`. The instant is
    /// unchanged; only the displayed wall-clock moves.
    pub fn with_timezone(events: Vec<Event>, tz: FixedOffset) -> Self {
        let mut cal = Self::new(events);
        cal.set_timezone(tz);
        cal
    }

    /// Fetch a date range from `source` and anchor it to `tz`.
    pub async fn fetch(
        source: &dyn CalendarSource,
        from: NaiveDate,
        to: NaiveDate,
        tz: FixedOffset,
    ) -> Result<Self> {
        let events = source.fetch(from, to).await?;
        info!(
            source = source.name(),
            from = %from,
            to = %to,
            rows = events.len(),
            "loaded economic calendar"
        );
        Ok(Self::with_timezone(events, tz))
    }

    pub fn set_timezone(&mut self, tz: FixedOffset) {
        self.tz = tz;
        for ev in &mut self.events {
            ev.date = ev.date.with_timezone(&tz);
        }
    }

    pub fn timezone(&self) -> FixedOffset {
        self.tz
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// New calendar containing only the rows the filter matches.
    pub fn filter(&self, filter: &CalendarFilter) -> Calendar {
        Calendar {
            events: self
                .events
                .iter()
                .filter(|e| filter.matches(e))
                .cloned()
                .collect(),
            tz: self.tz,
        }
    }

    /// Rewrite every title to its canonical comparison form (bracketed
    /// qualifiers and period tokens stripped).
    pub fn refactor_events(&mut self) {
        for ev in &mut self.events {
            ev.event = reduce::normalize_title(&ev.event);
        }
    }

    /// Collapse duplicate announcements per timestamp bucket, keeping the
    /// most severe version. Returns the number of removed rows.
    pub fn reduce(&mut self) -> usize {
        let before = self.events.len();
        self.events = reduce::reduce_calendar(&self.events);
        before - self.events.len()
    }

    /// Non-mutating variant of [`Calendar::reduce`].
    pub fn reduced(&self) -> Calendar {
        Calendar {
            events: reduce::reduce_calendar(&self.events),
            tz: self.tz,
        }
    }

    /// Prefix every title with the star marker of its impact.
    pub fn emojify_events(&mut self) {
        for ev in &mut self.events {
            ev.event = annotate::emojify_text(ev.impact, &ev.event);
        }
    }

    pub fn to_csv_string(&self) -> String {
        export::csv_string(&self.events)
    }

    pub fn write_csv(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        export::write_csv(&self.events, path)
    }

    pub fn to_ics_string(&self) -> String {
        export::ics_string(&self.events)
    }

    pub fn write_ics(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        export::write_ics(&self.events, path)
    }

    /// Rows as a JSON array (the serde view of [`Event`]).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }
}
