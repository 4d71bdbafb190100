//! Recency filter.

use chrono::{DateTime, Utc};

use crate::review::types::ReviewEntry;

/// Whether an entry is recent enough to notify about.
///
/// Inclusive at the boundary: an entry updated exactly at `cutoff` is kept.
pub fn is_recent(entry: &ReviewEntry, cutoff: DateTime<Utc>) -> bool {
    cutoff <= entry.updated_utc()
}

/// Keep the entries updated at or after `cutoff`, preserving feed order.
pub fn select_recent(entries: &[ReviewEntry], cutoff: DateTime<Utc>) -> Vec<&ReviewEntry> {
    entries.iter().filter(|e| is_recent(e, cutoff)).collect()
}
