use std::sync::Arc;

use depot_api::{BatchRegistry, Bom, DepotClient, Sku};

use crate::error::CoreError;
use crate::filters::{CatalogFilters, ListParams};
use crate::store::{ListContainer, ListState};

/// Read-only catalog lists: BOMs, SKUs, and the batch registry.
pub struct Catalog {
    client: Arc<DepotClient>,
    page_size: u32,
    boms: ListContainer<Bom>,
    skus: ListContainer<Sku>,
    batches: ListContainer<BatchRegistry>,
}

impl Catalog {
    pub(crate) fn new(client: Arc<DepotClient>, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            boms: ListContainer::new("BOMs", page_size),
            skus: ListContainer::new("SKUs", page_size),
            batches: ListContainer::new("batch registry", page_size),
        }
    }

    pub fn boms(&self) -> &ListContainer<Bom> {
        &self.boms
    }

    pub fn skus(&self) -> &ListContainer<Sku> {
        &self.skus
    }

    pub fn batches(&self) -> &ListContainer<BatchRegistry> {
        &self.batches
    }

    pub async fn fetch_boms(
        &self,
        params: &ListParams<CatalogFilters>,
    ) -> Result<Arc<ListState<Bom>>, CoreError> {
        let query = params.to_query(self.page_size);
        self.boms.run(self.client.list_boms(&query)).await
    }

    pub async fn fetch_skus(
        &self,
        params: &ListParams<CatalogFilters>,
    ) -> Result<Arc<ListState<Sku>>, CoreError> {
        let query = params.to_query(self.page_size);
        self.skus.run(self.client.list_skus(&query)).await
    }

    pub async fn fetch_batches(
        &self,
        params: &ListParams<CatalogFilters>,
    ) -> Result<Arc<ListState<BatchRegistry>>, CoreError> {
        let query = params.to_query(self.page_size);
        self.batches
            .run(self.client.list_batch_registry(&query))
            .await
    }
}
