// src/export/ics.rs
//! Calendar-invite export: one VEVENT per surviving announcement with a
//! display alarm 2 minutes before the start.
//!
//! UIDs must be stable across regenerations so calendar clients update
//! events in place instead of duplicating them: the UID is derived from
//! the summary + UTC start time, not from a random source.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::event::Event;

const PRODID: &str = "-//fmp-economic-calendar//EN";
const DTSTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const REMINDER_TRIGGER: &str = "-PT2M";

/// Render events as VCALENDAR text, stamped with the current time.
pub fn ics_string(events: &[Event]) -> String {
    ics_string_at(events, Utc::now())
}

/// Write the VCALENDAR rendering to `path`.
pub fn write_ics(events: &[Event], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, ics_string(events))
        .with_context(|| format!("writing ICS to {}", path.display()))
}

/// Stable per-event identifier: first 32 hex chars of SHA-256 over
/// `"{summary}-{dtstart}"`.
pub fn event_uid(summary: &str, dtstart: &str) -> String {
    let digest = Sha256::digest(format!("{summary}-{dtstart}").as_bytes());
    let mut uid = String::with_capacity(32);
    for byte in digest.iter().take(16) {
        uid.push_str(&format!("{byte:02x}"));
    }
    uid
}

fn ics_string_at(events: &[Event], stamp: DateTime<Utc>) -> String {
    let now = stamp.format(DTSTAMP_FORMAT).to_string();

    let mut out = String::new();
    out.push_str("BEGIN:VCALENDAR\n");
    out.push_str(&format!("PRODID:{PRODID}\n"));
    out.push_str("CALSCALE:GREGORIAN\n");
    out.push_str("VERSION:2.0\n");

    for ev in events {
        let dtstart = ev
            .date
            .with_timezone(&Utc)
            .format(DTSTAMP_FORMAT)
            .to_string();
        let categories = ev.category.as_deref().unwrap_or(&ev.country);
        let uid = event_uid(&ev.event, &dtstart);

        out.push_str("BEGIN:VEVENT\n");
        out.push_str(&format!("CATEGORIES:{categories}\n"));
        out.push_str(&format!("DTSTART:{dtstart}\n"));
        out.push_str(&format!("DTSTAMP:{now}\n"));
        out.push_str(&format!("CREATED:{now}\n"));
        out.push_str(&format!("LAST-MODIFIED:{now}\n"));
        out.push_str("SEQUENCE:0\n");
        out.push_str("STATUS:CONFIRMED\n");
        out.push_str("TRANSP:OPAQUE\n");
        out.push_str(&format!("SUMMARY:{}\n", ev.event));
        out.push_str(&format!("UID:{uid}\n"));
        out.push_str("BEGIN:VALARM\n");
        out.push_str("ACTION:DISPLAY\n");
        out.push_str(&format!("TRIGGER:{REMINDER_TRIGGER}\n"));
        out.push_str("DESCRIPTION:Event reminder\n");
        out.push_str("END:VALARM\n");
        out.push_str("END:VEVENT\n");
    }

    out.push_str("END:VCALENDAR");
    out
}
