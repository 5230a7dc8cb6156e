// Warehouse inventory endpoints
//
// The summary is one row per SKU and warehouse; details break a single
// row down by lot.

use crate::client::{DepotClient, ExportPayload};
use crate::endpoints;
use crate::envelope::Page;
use crate::error::Error;
use crate::query::{ExportQuery, ListQuery};
use crate::types::{InventoryDetail, InventorySummary, RecordId};

impl DepotClient {
    /// `GET /warehouse-inventory/summary`
    pub async fn inventory_summary(
        &self,
        query: &ListQuery,
    ) -> Result<Page<InventorySummary>, Error> {
        self.get_page(endpoints::INVENTORY_SUMMARY, query).await
    }

    /// `GET /warehouse-inventory/summary/:itemId/details`
    pub async fn inventory_details(
        &self,
        item_id: &RecordId,
        query: &ListQuery,
    ) -> Result<Page<InventoryDetail>, Error> {
        if item_id.as_str().trim().is_empty() {
            return Err(Error::InvalidRequest("item id must not be empty".into()));
        }
        self.get_page(&endpoints::inventory_details(item_id.as_str()), query)
            .await
    }

    /// `GET /warehouse-inventory/summary/export`
    pub async fn export_inventory_summary(
        &self,
        query: &ExportQuery,
    ) -> Result<ExportPayload, Error> {
        self.get_export(endpoints::INVENTORY_SUMMARY_EXPORT, query)
            .await
    }
}
