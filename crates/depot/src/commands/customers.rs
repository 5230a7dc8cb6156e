//! Customer command handlers.

use tabled::Tabled;

use depot_core::{Customer, CustomerFilters, Depot, ListParams, NewCustomer};

use crate::cli::{CustomersArgs, CustomersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{report_created, util};

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.to_string(),
            code: c.customer_code.clone().unwrap_or_default(),
            name: c.name.clone(),
            email: c.email.clone().unwrap_or_default(),
            country: c.country.clone().unwrap_or_default(),
            status: c.status.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    depot: &Depot,
    args: CustomersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let customers = depot.customers();
    match args.command {
        CustomersCommand::List {
            list,
            status,
            country,
        } => {
            let filters = CustomerFilters {
                keyword: list.keyword.clone(),
                status,
                country,
            };
            let state = customers.fetch(&util::list_params(&list, filters)?).await?;
            let out = output::render_page(
                global,
                &state,
                |c| CustomerRow::from(c),
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Create { create } => {
            let records: Vec<NewCustomer> = util::read_records(&create.from_file)?;
            let state = customers
                .create(util::create_mode(create.mode), records)
                .await?;
            report_created(
                global,
                "customer",
                &state,
                |c| CustomerRow::from(c),
                |c| c.id.to_string(),
            )?;

            if create.refresh {
                let state = customers
                    .fetch(&ListParams::new(CustomerFilters::default()))
                    .await?;
                let out = output::render_page(
                    global,
                    &state,
                    |c| CustomerRow::from(c),
                    |c| c.id.to_string(),
                )?;
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }
    }
}
