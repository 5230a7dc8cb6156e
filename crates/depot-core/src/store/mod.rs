// ── State containers ──
//
// One container type per contract: paginated lists, create mutations, and
// export downloads. Each owns a `watch` channel of `Arc` snapshots; the
// feature that owns the container is its only writer.

mod export;
mod list;
mod mutation;

pub use export::{ExportContainer, ExportFile, ExportState, export_filename};
pub use list::{ListContainer, ListState};
pub use mutation::{MutationContainer, MutationState};
