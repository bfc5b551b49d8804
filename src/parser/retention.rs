//! Retention policy: chronological order, most-recent-N.

use crate::model::MessageRecord;

/// Default number of records kept after parsing.
pub const DEFAULT_RETENTION_CAP: usize = 16_000;

/// Sort `records` by timestamp and keep only the newest `cap`.
///
/// The sort is stable, so records sharing a timestamp keep their encounter
/// order and repeated runs over the same input give identical output.
/// Returns how many records were dropped.
///
/// # Panics
///
/// Panics if `cap` is zero.
pub fn apply_retention(records: &mut Vec<MessageRecord>, cap: usize) -> usize {
    assert!(cap > 0, "retention cap must be at least 1");

    records.sort_by_key(|record| record.timestamp);

    let excess = records.len().saturating_sub(cap);
    records.drain(..excess);
    excess
}
