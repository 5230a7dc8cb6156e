//! Lookup command handler.

use tabled::Tabled;

use depot_core::{Depot, LookupOption, LookupOutcome};

use crate::cli::{GlobalOpts, LookupArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
}

impl From<&LookupOption> for OptionRow {
    fn from(o: &LookupOption) -> Self {
        Self {
            value: o.value.to_string(),
            label: o.label.clone(),
        }
    }
}

pub async fn handle(depot: &Depot, args: LookupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let session = depot.lookup(util::lookup_kind(args.kind));
    match args.keyword.as_deref() {
        Some(keyword) => session.search_now(keyword).await?,
        None => session.load_initial().await?,
    };
    for _ in 1..args.pages {
        if session.fetch_more().await? == LookupOutcome::Exhausted {
            break;
        }
    }

    let state = session.snapshot();
    let out = output::render_list(
        global.output,
        &state.options,
        |o| OptionRow::from(o),
        |o| o.value.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    if state.has_more && !global.quiet {
        eprintln!("More options available; use --pages to load them.");
    }
    Ok(())
}
