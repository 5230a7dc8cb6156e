// depot-core: state containers and business rules between depot-api and
// consumers (CLI, tests).

pub mod activity;
pub mod bulk;
pub mod config;
pub mod dates;
pub mod dedup;
pub mod depot;
pub mod error;
pub mod feature;
pub mod filters;
pub mod lookup;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use activity::merge_activity_logs;
pub use bulk::{CreateMode, CustomerOwned, assign_customer_ids};
pub use config::{ClientConfig, TlsVerification};
pub use dates::DateRange;
pub use dedup::dedup_options;
pub use depot::Depot;
pub use error::CoreError;
pub use feature::{
    ACTIVITY_EXPORT_TOKEN, Addresses, Catalog, Customers, INVENTORY_EXPORT_TOKEN, Inventory,
    Reports,
};
pub use filters::{
    ActivityLogFilters, AddressFilters, CatalogFilters, CustomerFilters, InventoryFilters,
    ListParams, ToFilters,
};
pub use lookup::{LookupOutcome, LookupSession, LookupState};
pub use store::{
    ExportContainer, ExportFile, ExportState, ListContainer, ListState, MutationContainer,
    MutationState, export_filename,
};
pub use stream::{StateStream, StateWatchStream};

// Wire types consumers need alongside the containers.
pub use depot_api::{
    ActivityLog, Address, ApiPage, BatchRegistry, Bom, Customer, ExportFormat, GridPage,
    InventoryDetail, InventorySummary, LookupKind, LookupOption, NewAddress, NewCustomer,
    PageMeta, RecordId, Sku, Sort, SortOrder, to_api_page, to_grid_page,
};
