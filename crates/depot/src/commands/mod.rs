//! Command dispatch: bridges CLI args -> feature operations -> output.

pub mod addresses;
pub mod catalog;
pub mod config_cmd;
pub mod customers;
pub mod inventory;
pub mod lookups;
pub mod reports;
pub mod util;

use std::path::Path;

use tabled::Tabled;

use depot_core::{Depot, ExportFile, MutationState};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, depot: &Depot, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Addresses(args) => addresses::handle(depot, args, global).await,
        Command::Customers(args) => customers::handle(depot, args, global).await,
        Command::Inventory(args) => inventory::handle(depot, args, global).await,
        Command::Reports(args) => reports::handle(depot, args, global).await,
        Command::Catalog(args) => catalog::handle(depot, args, global).await,
        Command::Lookup(args) => lookups::handle(depot, args, global).await,
        // Handled before a client is built
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Ok(()),
    }
}

/// Print the outcome of a create call: a summary line on stderr and the
/// created records on stdout.
pub(crate) fn report_created<T, R>(
    global: &GlobalOpts,
    noun: &str,
    state: &MutationState<T>,
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    let created = state.data.as_deref().unwrap_or_default();
    if !global.quiet {
        let summary = state.message.clone().unwrap_or_else(|| {
            let plural = if created.len() == 1 { "" } else { "s" };
            format!("Created {} {noun}{plural}", created.len())
        });
        eprintln!("{}", output::success_line(&summary, global.color));
    }
    let out = output::render_list(global.output, created, to_row, id_fn)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Write a finished export and report where it went.
pub(crate) fn finish_export(
    global: &GlobalOpts,
    file: ExportFile,
    dir: &Path,
) -> Result<(), CliError> {
    let path = util::write_export(&file, dir)?;
    if !global.quiet {
        eprintln!(
            "{}",
            output::success_line(
                &format!("Wrote {} bytes ({})", file.bytes.len(), file.content_type),
                global.color
            )
        );
    }
    println!("{}", path.display());
    Ok(())
}
