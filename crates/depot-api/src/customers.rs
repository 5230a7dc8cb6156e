// Customer endpoints

use tracing::debug;

use crate::client::DepotClient;
use crate::endpoints;
use crate::envelope::{MutationResult, Page};
use crate::error::Error;
use crate::query::ListQuery;
use crate::types::{Customer, NewCustomer};

impl DepotClient {
    /// List one page of customers.
    ///
    /// `GET /customers`
    pub async fn list_customers(&self, query: &ListQuery) -> Result<Page<Customer>, Error> {
        self.get_page(endpoints::CUSTOMERS, query).await
    }

    /// Create one or many customers.
    ///
    /// `POST /customers/add-new-customers` with an array body.
    pub async fn create_customers(
        &self,
        customers: &[NewCustomer],
    ) -> Result<MutationResult<Customer>, Error> {
        debug!(count = customers.len(), "creating customers");
        self.post_create(endpoints::CUSTOMERS_CREATE, customers).await
    }
}
