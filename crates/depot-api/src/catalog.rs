// Catalog endpoints: BOMs, SKUs, and the batch registry

use crate::client::DepotClient;
use crate::endpoints;
use crate::envelope::Page;
use crate::error::Error;
use crate::query::ListQuery;
use crate::types::{BatchRegistry, Bom, Sku};

impl DepotClient {
    /// `GET /boms`
    pub async fn list_boms(&self, query: &ListQuery) -> Result<Page<Bom>, Error> {
        self.get_page(endpoints::BOMS, query).await
    }

    /// `GET /skus`
    pub async fn list_skus(&self, query: &ListQuery) -> Result<Page<Sku>, Error> {
        self.get_page(endpoints::SKUS, query).await
    }

    /// `GET /batch-registry`
    pub async fn list_batch_registry(
        &self,
        query: &ListQuery,
    ) -> Result<Page<BatchRegistry>, Error> {
        self.get_page(endpoints::BATCH_REGISTRY, query).await
    }
}
