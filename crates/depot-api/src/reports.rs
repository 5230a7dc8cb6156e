// Report endpoints

use crate::client::{DepotClient, ExportPayload};
use crate::endpoints;
use crate::envelope::Page;
use crate::error::Error;
use crate::query::{ExportQuery, ListQuery};
use crate::types::ActivityLog;

impl DepotClient {
    /// `GET /reports/inventory-activity-logs`
    pub async fn activity_logs(&self, query: &ListQuery) -> Result<Page<ActivityLog>, Error> {
        self.get_page(endpoints::ACTIVITY_LOGS, query).await
    }

    /// `GET /reports/inventory-activity-logs/export`
    pub async fn export_activity_logs(&self, query: &ExportQuery) -> Result<ExportPayload, Error> {
        self.get_export(endpoints::ACTIVITY_LOGS_EXPORT, query)
            .await
    }
}
