// ── Dropdown option deduplication ──
//
// Lookup pages can overlap (the server re-sorts between requests, or two
// keywords match the same record). Every consumer goes through here.

use std::collections::HashSet;

use depot_api::{LookupOption, RecordId};

/// Remove options whose `value` was already seen, keeping the first entry.
pub fn dedup_options(options: impl IntoIterator<Item = LookupOption>) -> Vec<LookupOption> {
    let mut seen: HashSet<RecordId> = HashSet::new();
    options
        .into_iter()
        .filter(|o| seen.insert(o.value.clone()))
        .collect()
}

/// Append `incoming` to `existing`, dropping values `existing` already has.
pub fn append_options(
    existing: &[LookupOption],
    incoming: impl IntoIterator<Item = LookupOption>,
) -> Vec<LookupOption> {
    dedup_options(existing.iter().cloned().chain(incoming))
}
