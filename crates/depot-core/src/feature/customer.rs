use std::sync::Arc;

use depot_api::{Customer, DepotClient, NewCustomer};
use tracing::debug;

use crate::bulk::CreateMode;
use crate::error::CoreError;
use crate::filters::{CustomerFilters, ListParams};
use crate::store::{ListContainer, ListState, MutationContainer, MutationState};

/// Customer list and customer creation.
pub struct Customers {
    client: Arc<DepotClient>,
    page_size: u32,
    list: ListContainer<Customer>,
    created: MutationContainer<Customer>,
}

impl Customers {
    pub(crate) fn new(client: Arc<DepotClient>, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            list: ListContainer::new("customers", page_size),
            created: MutationContainer::new("customers"),
        }
    }

    pub fn list(&self) -> &ListContainer<Customer> {
        &self.list
    }

    pub fn created(&self) -> &MutationContainer<Customer> {
        &self.created
    }

    pub async fn fetch(
        &self,
        params: &ListParams<CustomerFilters>,
    ) -> Result<Arc<ListState<Customer>>, CoreError> {
        let query = params.to_query(self.page_size);
        debug!(page = %query.page, limit = query.limit, "fetching customers");
        self.list.run(self.client.list_customers(&query)).await
    }

    pub async fn create(
        &self,
        mode: CreateMode,
        records: Vec<NewCustomer>,
    ) -> Result<Arc<MutationState<Customer>>, CoreError> {
        if let Err(err) = mode.validate(&records) {
            self.created.fail(&err);
            return Err(err);
        }
        if let Some(blank) = records.iter().position(|c| c.name.trim().is_empty()) {
            let err = CoreError::validation(format!("customer #{} has no name", blank + 1));
            self.created.fail(&err);
            return Err(err);
        }
        self.created
            .run(self.client.create_customers(&records))
            .await
    }

    pub fn reset_created(&self) {
        self.created.reset();
    }
}
