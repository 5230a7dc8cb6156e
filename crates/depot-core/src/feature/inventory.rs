use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use depot_api::{DepotClient, ExportFormat, InventoryDetail, InventorySummary, RecordId};
use tracing::debug;

use crate::error::CoreError;
use crate::filters::{InventoryFilters, ListParams};
use crate::store::{ExportContainer, ExportFile, ListContainer, ListState};

/// Filename token for inventory summary exports.
pub const INVENTORY_EXPORT_TOKEN: &str = "warehouse-inventory-summary";

/// Inventory summary, per-item lot details, and summary export.
pub struct Inventory {
    client: Arc<DepotClient>,
    page_size: u32,
    summary: ListContainer<InventorySummary>,
    details: ListContainer<InventoryDetail>,
    /// Item whose lots `details` currently holds.
    selected: Mutex<Option<RecordId>>,
    export: ExportContainer,
}

impl Inventory {
    pub(crate) fn new(client: Arc<DepotClient>, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            summary: ListContainer::new("inventory summary", page_size),
            details: ListContainer::new("inventory details", page_size),
            selected: Mutex::new(None),
            export: ExportContainer::new(INVENTORY_EXPORT_TOKEN),
        }
    }

    pub fn summary(&self) -> &ListContainer<InventorySummary> {
        &self.summary
    }

    pub fn details(&self) -> &ListContainer<InventoryDetail> {
        &self.details
    }

    pub fn export_state(&self) -> &ExportContainer {
        &self.export
    }

    pub fn selected_item(&self) -> Option<RecordId> {
        self.selected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn fetch_summary(
        &self,
        params: &ListParams<InventoryFilters>,
    ) -> Result<Arc<ListState<InventorySummary>>, CoreError> {
        let query = params.to_query(self.page_size);
        debug!(page = %query.page, limit = query.limit, "fetching inventory summary");
        self.summary
            .run(self.client.inventory_summary(&query))
            .await
    }

    /// Fetch lot details for one item. Switching items clears the
    /// previous item's rows first.
    pub async fn fetch_details(
        &self,
        item_id: &RecordId,
        params: &ListParams<()>,
    ) -> Result<Arc<ListState<InventoryDetail>>, CoreError> {
        if item_id.as_str().trim().is_empty() {
            let err = CoreError::validation("an item id is required");
            self.details.fail(&err);
            return Err(err);
        }
        let switched = {
            let mut selected = self.selected.lock().unwrap_or_else(PoisonError::into_inner);
            let switched = selected.as_ref() != Some(item_id);
            *selected = Some(item_id.clone());
            switched
        };
        if switched {
            self.details.reset();
        }

        let query = params.to_query(self.page_size);
        debug!(item = %item_id, page = %query.page, "fetching inventory details");
        self.details
            .run(self.client.inventory_details(item_id, &query))
            .await
    }

    /// Download the summary with the given filters and sort, without paging.
    pub async fn export_summary(
        &self,
        params: &ListParams<InventoryFilters>,
        format: ExportFormat,
    ) -> Result<ExportFile, CoreError> {
        let query = params.to_query(self.page_size).for_export(format);
        self.export
            .run(
                format,
                Utc::now().date_naive(),
                self.client.export_inventory_summary(&query),
            )
            .await
    }
}
