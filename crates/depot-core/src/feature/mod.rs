// ── Feature handles ──
//
// One handle per backend area. A handle owns its containers and a shared
// client; its operations are the only writers to those containers.

mod address;
mod catalog;
mod customer;
mod inventory;
mod report;

pub use address::Addresses;
pub use catalog::Catalog;
pub use customer::Customers;
pub use inventory::{INVENTORY_EXPORT_TOKEN, Inventory};
pub use report::{ACTIVITY_EXPORT_TOKEN, Reports};
