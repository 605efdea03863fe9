// src/reduce/mod.rs
//! Deduplication of near-identical announcements within one timestamp.
//!
//! Several upstream sources report the same real-world event with slightly
//! different titles (translated, abbreviated, revised) and impact labels.
//! Rows are grouped into buckets by exact timestamp; within a bucket every
//! ordered pair is judged by the similarity heuristic and the less severe
//! side of a duplicate pair is dropped. Reduction only removes rows: it
//! never merges or rewrites field values.

pub mod normalize;
pub mod similarity;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset};
use tracing::info;

use crate::event::Event;

pub use normalize::normalize_title;
pub use similarity::{same_event, seq_ratio};

/// Reduce one bucket of events sharing a timestamp.
///
/// Ordered-pair sweep with an accumulating discard set: for every `idx`,
/// every other row not yet discarded is compared against it. On a duplicate
/// verdict the strictly-less-severe row is marked; on an impact tie the
/// outer (`idx`) row is marked, so an earlier-surviving row wins the tie.
/// Marks are never reversed. O(n²), fine for the handful of simultaneous
/// announcements a bucket holds.
pub fn reduce_bucket(bucket: &[Event]) -> Vec<Event> {
    let titles: Vec<String> = bucket.iter().map(|e| normalize_title(&e.event)).collect();
    let mut discard: HashSet<usize> = HashSet::new();

    for idx in 0..bucket.len() {
        let main_rank = bucket[idx].impact.rank();
        for other in 0..bucket.len() {
            if other == idx || discard.contains(&other) {
                continue;
            }
            if !same_event(&titles[idx], &titles[other]) {
                continue;
            }
            if main_rank < bucket[other].impact.rank() {
                discard.insert(other);
            } else {
                discard.insert(idx);
            }
        }
    }

    bucket
        .iter()
        .enumerate()
        .filter(|(i, _)| !discard.contains(i))
        .map(|(_, e)| e.clone())
        .collect()
}

/// Reduce a full calendar: group rows into timestamp buckets (first-seen
/// order), reduce each bucket with more than one row, and reassemble.
/// Bucket order and intra-bucket row order are preserved. Logs the size
/// reduction.
pub fn reduce_calendar(events: &[Event]) -> Vec<Event> {
    let mut order: Vec<DateTime<FixedOffset>> = Vec::new();
    let mut buckets: HashMap<DateTime<FixedOffset>, Vec<Event>> = HashMap::new();
    for ev in events {
        let slot = buckets.entry(ev.date).or_default();
        if slot.is_empty() {
            order.push(ev.date);
        }
        slot.push(ev.clone());
    }

    let mut reduced: Vec<Event> = Vec::with_capacity(events.len());
    for ts in order {
        let bucket = buckets.remove(&ts).unwrap_or_default();
        if bucket.len() == 1 {
            reduced.extend(bucket);
        } else {
            reduced.extend(reduce_bucket(&bucket));
        }
    }

    info!(
        input = events.len(),
        output = reduced.len(),
        "reduced calendar"
    );
    reduced
}
