// Endpoint templates for the Depot REST API.
//
// Every path the client touches is collected here. Paths are relative to
// the configured base URL and never start with a slash.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

pub const ADDRESSES: &str = "addresses";
pub const ADDRESSES_CREATE: &str = "addresses/add-new-addresses";

pub const CUSTOMERS: &str = "customers";
pub const CUSTOMERS_CREATE: &str = "customers/add-new-customers";

pub const INVENTORY_SUMMARY: &str = "warehouse-inventory/summary";
pub const INVENTORY_SUMMARY_EXPORT: &str = "warehouse-inventory/summary/export";

pub const ACTIVITY_LOGS: &str = "reports/inventory-activity-logs";
pub const ACTIVITY_LOGS_EXPORT: &str = "reports/inventory-activity-logs/export";

pub const BOMS: &str = "boms";
pub const SKUS: &str = "skus";
pub const BATCH_REGISTRY: &str = "batch-registry";

/// `warehouse-inventory/summary/{item_id}/details`
pub fn inventory_details(item_id: &str) -> String {
    format!("{INVENTORY_SUMMARY}/{item_id}/details")
}

/// `lookups/{kind}`
pub fn lookup(kind: LookupKind) -> String {
    format!("lookups/{kind}")
}

/// Reference entities served by the `lookups/` endpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum LookupKind {
    Customers,
    Warehouses,
    BatchRegistry,
    LotAdjustmentTypes,
    SkuCodeBases,
}
