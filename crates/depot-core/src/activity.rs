// ── Activity log merging ──
//
// The activity report can return the same movement split across several
// rows (one per pick line). Rows with the same composite key collapse into
// one whose quantity is the sum.

use depot_api::ActivityLog;
use indexmap::IndexMap;
use indexmap::map::Entry;

/// `activityDate|skuCode|warehouseName|lotNumber|activityType|referenceNumber`
pub fn merge_key(log: &ActivityLog) -> String {
    [
        log.activity_date.to_rfc3339(),
        log.sku_code.clone(),
        log.warehouse_name.clone().unwrap_or_default(),
        log.lot_number.clone().unwrap_or_default(),
        log.activity_type.clone(),
        log.reference_number.clone().unwrap_or_default(),
    ]
    .join("|")
}

/// Merge duplicate rows, summing `quantity_change`.
///
/// The first row of each key keeps its position and its other fields.
pub fn merge_activity_logs(logs: impl IntoIterator<Item = ActivityLog>) -> Vec<ActivityLog> {
    let mut merged: IndexMap<String, ActivityLog> = IndexMap::new();
    for log in logs {
        match merged.entry(merge_key(&log)) {
            Entry::Occupied(mut e) => e.get_mut().quantity_change += log.quantity_change,
            Entry::Vacant(e) => {
                e.insert(log);
            }
        }
    }
    merged.into_values().collect()
}
