use std::sync::Arc;

use depot_api::{Address, DepotClient, NewAddress, RecordId};
use tracing::debug;

use crate::bulk::{CreateMode, assign_customer_ids};
use crate::error::CoreError;
use crate::filters::{AddressFilters, ListParams};
use crate::store::{ListContainer, ListState, MutationContainer, MutationState};

/// Address list and address creation.
pub struct Addresses {
    client: Arc<DepotClient>,
    page_size: u32,
    list: ListContainer<Address>,
    created: MutationContainer<Address>,
}

impl Addresses {
    pub(crate) fn new(client: Arc<DepotClient>, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            list: ListContainer::new("addresses", page_size),
            created: MutationContainer::new("addresses"),
        }
    }

    pub fn list(&self) -> &ListContainer<Address> {
        &self.list
    }

    pub fn created(&self) -> &MutationContainer<Address> {
        &self.created
    }

    pub async fn fetch(
        &self,
        params: &ListParams<AddressFilters>,
    ) -> Result<Arc<ListState<Address>>, CoreError> {
        let query = params.to_query(self.page_size);
        debug!(page = %query.page, limit = query.limit, "fetching addresses");
        self.list.run(self.client.list_addresses(&query)).await
    }

    /// Create addresses, stamping `customer_ids` onto them first.
    ///
    /// Validation failures are recorded in the mutation container and
    /// returned without sending a request.
    pub async fn create(
        &self,
        mode: CreateMode,
        mut records: Vec<NewAddress>,
        customer_ids: &[RecordId],
    ) -> Result<Arc<MutationState<Address>>, CoreError> {
        let prepared = mode
            .validate(&records)
            .and_then(|()| assign_customer_ids(&mut records, customer_ids));
        if let Err(err) = prepared {
            self.created.fail(&err);
            return Err(err);
        }
        self.created
            .run(self.client.create_addresses(&records))
            .await
    }

    pub fn reset_created(&self) {
        self.created.reset();
    }
}
