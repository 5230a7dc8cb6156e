// Address endpoints

use tracing::debug;

use crate::client::DepotClient;
use crate::endpoints;
use crate::envelope::{MutationResult, Page};
use crate::error::Error;
use crate::query::ListQuery;
use crate::types::{Address, NewAddress};

impl DepotClient {
    /// List one page of addresses.
    ///
    /// `GET /addresses?page=&limit=&sortBy=&sortOrder=&...filters`
    pub async fn list_addresses(&self, query: &ListQuery) -> Result<Page<Address>, Error> {
        self.get_page(endpoints::ADDRESSES, query).await
    }

    /// Create one or many addresses.
    ///
    /// `POST /addresses/add-new-addresses` with an array body.
    pub async fn create_addresses(
        &self,
        addresses: &[NewAddress],
    ) -> Result<MutationResult<Address>, Error> {
        debug!(count = addresses.len(), "creating addresses");
        self.post_create(endpoints::ADDRESSES_CREATE, addresses).await
    }
}
