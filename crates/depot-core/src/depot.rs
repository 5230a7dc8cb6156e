// ── Composition root ──
//
// `Depot` builds one shared `DepotClient` and hands it to every feature
// through its constructor. Features never reach each other; consumers ask
// the root for the handle they need.

use std::sync::Arc;

use depot_api::{DepotClient, LookupKind};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::feature::{Addresses, Catalog, Customers, Inventory, Reports};
use crate::lookup::LookupSession;

/// Entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct Depot {
    inner: Arc<DepotInner>,
}

struct DepotInner {
    config: ClientConfig,
    client: Arc<DepotClient>,
    addresses: Addresses,
    customers: Customers,
    inventory: Inventory,
    reports: Reports,
    catalog: Catalog,
}

impl Depot {
    /// Build the HTTP client and every feature. Does not contact the server.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client = DepotClient::new(config.url.as_str(), &config.transport())?;
        debug!(url = %client.base_url(), "depot client ready");
        Ok(Self::with_client(config, client))
    }

    /// Wire features around an already-built client.
    pub fn with_client(config: ClientConfig, client: DepotClient) -> Self {
        let client = Arc::new(client);
        let lists = config.page_size;
        let reports = config.report_page_size;
        Self {
            inner: Arc::new(DepotInner {
                addresses: Addresses::new(Arc::clone(&client), lists),
                customers: Customers::new(Arc::clone(&client), lists),
                inventory: Inventory::new(Arc::clone(&client), lists),
                reports: Reports::new(Arc::clone(&client), reports),
                catalog: Catalog::new(Arc::clone(&client), lists),
                client,
                config,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &Arc<DepotClient> {
        &self.inner.client
    }

    pub fn addresses(&self) -> &Addresses {
        &self.inner.addresses
    }

    pub fn customers(&self) -> &Customers {
        &self.inner.customers
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inner.inventory
    }

    pub fn reports(&self) -> &Reports {
        &self.inner.reports
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// A fresh lookup session; each dropdown gets its own.
    pub fn lookup(&self, kind: LookupKind) -> LookupSession {
        LookupSession::new(
            Arc::clone(&self.inner.client),
            kind,
            self.inner.config.lookup_limit,
            self.inner.config.lookup_debounce,
        )
    }
}
