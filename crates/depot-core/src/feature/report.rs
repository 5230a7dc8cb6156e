use std::sync::Arc;

use chrono::Utc;
use depot_api::{ActivityLog, DepotClient, ExportFormat, Page};
use tracing::debug;

use crate::activity::merge_activity_logs;
use crate::error::CoreError;
use crate::filters::{ActivityLogFilters, ListParams};
use crate::store::{ExportContainer, ExportFile, ListContainer, ListState};

/// Filename token for activity log exports.
pub const ACTIVITY_EXPORT_TOKEN: &str = "inventory-activity-logs";

/// The inventory activity report and its export.
pub struct Reports {
    client: Arc<DepotClient>,
    page_size: u32,
    activity: ListContainer<ActivityLog>,
    export: ExportContainer,
}

impl Reports {
    pub(crate) fn new(client: Arc<DepotClient>, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            activity: ListContainer::new("activity logs", page_size),
            export: ExportContainer::new(ACTIVITY_EXPORT_TOKEN),
        }
    }

    pub fn activity(&self) -> &ListContainer<ActivityLog> {
        &self.activity
    }

    pub fn export_state(&self) -> &ExportContainer {
        &self.export
    }

    /// Fetch one page of activity. With `merge`, rows sharing a movement
    /// key are collapsed before they reach the container; pagination stays
    /// the server's.
    pub async fn fetch_activity(
        &self,
        params: &ListParams<ActivityLogFilters>,
        merge: bool,
    ) -> Result<Arc<ListState<ActivityLog>>, CoreError> {
        let query = params.to_query(self.page_size);
        debug!(page = %query.page, limit = query.limit, merge, "fetching activity logs");
        let client = &self.client;
        self.activity
            .run(async move {
                let page = client.activity_logs(&query).await?;
                Ok(if merge {
                    Page {
                        items: merge_activity_logs(page.items),
                        pagination: page.pagination,
                    }
                } else {
                    page
                })
            })
            .await
    }

    pub async fn export_activity(
        &self,
        params: &ListParams<ActivityLogFilters>,
        format: ExportFormat,
    ) -> Result<ExportFile, CoreError> {
        let query = params.to_query(self.page_size).for_export(format);
        self.export
            .run(
                format,
                Utc::now().date_naive(),
                self.client.export_activity_logs(&query),
            )
            .await
    }
}
