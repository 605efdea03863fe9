// src/export/mod.rs
//! Downstream output formats for a (usually reduced) calendar.

pub mod csv;
pub mod ics;

pub use csv::{csv_string, write_csv};
pub use ics::{ics_string, write_ics};
