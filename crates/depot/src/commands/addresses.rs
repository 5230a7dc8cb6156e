//! Address command handlers.

use tabled::Tabled;

use depot_core::{Address, AddressFilters, Depot, ListParams, NewAddress};

use crate::cli::{AddressesArgs, AddressesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{report_created, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AddressRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Address")]
    line1: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Default")]
    is_default: String,
}

impl From<&Address> for AddressRow {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id.to_string(),
            customer: a
                .customer_name
                .clone()
                .or_else(|| a.customer_id.as_ref().map(ToString::to_string))
                .unwrap_or_default(),
            kind: a.address_type.clone().unwrap_or_default(),
            line1: a.address_line1.clone(),
            city: a.city.clone().unwrap_or_default(),
            country: a.country.clone().unwrap_or_default(),
            is_default: if a.is_default { "yes".into() } else { String::new() },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    depot: &Depot,
    args: AddressesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let addresses = depot.addresses();
    match args.command {
        AddressesCommand::List {
            list,
            country,
            address_type,
            customer_ids,
        } => {
            let filters = AddressFilters {
                keyword: list.keyword.clone(),
                country,
                address_type,
                customer_ids: util::record_ids(&customer_ids),
            };
            let state = addresses.fetch(&util::list_params(&list, filters)?).await?;
            let out = output::render_page(
                global,
                &state,
                |a| AddressRow::from(a),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AddressesCommand::Create {
            create,
            customer_ids,
        } => {
            let records: Vec<NewAddress> = util::read_records(&create.from_file)?;
            let state = addresses
                .create(
                    util::create_mode(create.mode),
                    records,
                    &util::record_ids(&customer_ids),
                )
                .await?;
            report_created(
                global,
                "address",
                &state,
                |a| AddressRow::from(a),
                |a| a.id.to_string(),
            )?;

            if create.refresh {
                let state = addresses
                    .fetch(&ListParams::new(AddressFilters::default()))
                    .await?;
                let out = output::render_page(
                    global,
                    &state,
                    |a| AddressRow::from(a),
                    |a| a.id.to_string(),
                )?;
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }
    }
}
