// src/export/csv.rs
//! Tabular export with a fixed column order.
//!
//! Missing numerics render as a single space rather than an empty cell so
//! downstream spreadsheet imports keep the column visible.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::event::Event;

const HEADER: &str =
    "date,country,currency,event,impact,category,previous,estimate,actual,change,change_percentage,unit";

const NA_REP: &str = " ";

/// Render events as CSV text. Dates are formatted in each event's own
/// offset; quoting follows RFC 4180 (fields containing commas, quotes or
/// newlines are quoted, inner quotes doubled).
pub fn csv_string(events: &[Event]) -> String {
    let mut out = String::with_capacity(64 * (events.len() + 1));
    out.push_str(HEADER);
    out.push('\n');

    for ev in events {
        let cols = [
            ev.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            ev.country.clone(),
            ev.currency.clone(),
            ev.event.clone(),
            ev.impact.as_str().to_string(),
            ev.category.clone().unwrap_or_else(|| NA_REP.to_string()),
            num_cell(ev.previous),
            num_cell(ev.estimate),
            num_cell(ev.actual),
            num_cell(ev.change),
            num_cell(ev.change_percentage),
            ev.unit.clone().unwrap_or_else(|| NA_REP.to_string()),
        ];
        let row: Vec<String> = cols.iter().map(|c| quote_field(c)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Write the CSV rendering to `path`.
pub fn write_csv(events: &[Event], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, csv_string(events))
        .with_context(|| format!("writing CSV to {}", path.display()))
}

fn num_cell(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{x}"),
        None => NA_REP.to_string(),
    }
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
