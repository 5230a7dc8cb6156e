//! Async Rust client for the Depot warehouse management REST API.
//!
//! One inherent method per REST call on [`DepotClient`]. Query parameters
//! go through a single canonical serializer ([`query`]), responses are
//! unwrapped from the `{success, message, data, pagination}` envelope, and
//! every failure is a typed [`Error`].

pub mod addresses;
pub mod catalog;
pub mod client;
pub mod customers;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod inventory;
pub mod lookups;
pub mod paging;
pub mod query;
pub mod reports;
pub mod transport;
pub mod types;

pub use client::{DepotClient, ExportPayload};
pub use endpoints::LookupKind;
pub use envelope::{MutationResult, Page, PageMeta};
pub use error::Error;
pub use lookups::LookupPage;
pub use paging::{ApiPage, GridPage, to_api_page, to_grid_page};
pub use query::{
    ExportFormat, ExportQuery, FilterValue, Filters, ListQuery, LookupQuery, Sort, SortOrder,
};
pub use transport::{TlsMode, TransportConfig};
pub use types::*;
