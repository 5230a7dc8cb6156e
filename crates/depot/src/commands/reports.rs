//! Report command handlers.

use tabled::Tabled;

use depot_core::{ActivityLog, ActivityLogFilters, DateRange, Depot};

use crate::cli::{ActivityFilterArgs, GlobalOpts, ListArgs, ReportsArgs, ReportsCommand};
use crate::error::CliError;
use crate::output;

use super::{finish_export, util};

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Warehouse")]
    warehouse: String,
    #[tabled(rename = "Lot")]
    lot: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "By")]
    performed_by: String,
}

impl From<&ActivityLog> for ActivityRow {
    fn from(l: &ActivityLog) -> Self {
        Self {
            date: l.activity_date.format("%Y-%m-%d %H:%M").to_string(),
            sku: l.sku_code.clone(),
            warehouse: l.warehouse_name.clone().unwrap_or_default(),
            lot: l.lot_number.clone().unwrap_or_default(),
            kind: l.activity_type.clone(),
            quantity: format!("{:+}", l.quantity_change),
            reference: l.reference_number.clone().unwrap_or_default(),
            performed_by: l.performed_by.clone().unwrap_or_default(),
        }
    }
}

fn filters(list: &ListArgs, args: ActivityFilterArgs) -> ActivityLogFilters {
    ActivityLogFilters {
        keyword: list.keyword.clone(),
        range: DateRange::new(args.from, args.to),
        warehouse_ids: util::record_ids(&args.warehouse_ids),
        customer_ids: util::record_ids(&args.customer_ids),
        activity_types: args.activity_types,
        lot_number: args.lot_number,
        batch_number: args.batch_number,
    }
}

pub async fn handle(depot: &Depot, args: ReportsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let reports = depot.reports();
    match args.command {
        ReportsCommand::Activity {
            list,
            filters: f,
            merge,
        } => {
            let params = util::list_params(&list, filters(&list, f))?;
            let state = reports.fetch_activity(&params, merge).await?;
            let out = output::render_page(
                global,
                &state,
                |l| ActivityRow::from(l),
                |l| {
                    l.reference_number
                        .clone()
                        .unwrap_or_else(|| l.sku_code.clone())
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ReportsCommand::Export {
            list,
            filters: f,
            export,
        } => {
            let params = util::list_params(&list, filters(&list, f))?;
            let format = util::export_format(export.format);
            let bar = util::spinner("Exporting activity log", global.quiet);
            let result = reports.export_activity(&params, format).await;
            bar.finish_and_clear();
            finish_export(global, result?, &export.out_dir)
        }
    }
}
