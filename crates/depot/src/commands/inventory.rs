//! Inventory command handlers.

use tabled::Tabled;

use depot_core::{Depot, InventoryDetail, InventoryFilters, InventorySummary, RecordId};

use crate::cli::{GlobalOpts, InventoryArgs, InventoryCommand, InventoryFilterArgs, ListArgs};
use crate::error::CliError;
use crate::output;

use super::{finish_export, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Item")]
    item_id: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Warehouse")]
    warehouse: String,
    #[tabled(rename = "On Hand")]
    on_hand: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "UoM")]
    uom: String,
}

impl From<&InventorySummary> for SummaryRow {
    fn from(s: &InventorySummary) -> Self {
        Self {
            item_id: s.item_id.to_string(),
            sku: s.sku_code.clone(),
            description: s.description.clone().unwrap_or_default(),
            warehouse: s.warehouse_name.clone().unwrap_or_default(),
            on_hand: s.on_hand.to_string(),
            allocated: s.allocated.to_string(),
            available: s.available.to_string(),
            uom: s.uom.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "Lot")]
    lot: String,
    #[tabled(rename = "Batch")]
    batch: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&InventoryDetail> for DetailRow {
    fn from(d: &InventoryDetail) -> Self {
        Self {
            lot: d.lot_number.clone().unwrap_or_default(),
            batch: d.batch_number.clone().unwrap_or_default(),
            location: d.location.clone().unwrap_or_default(),
            quantity: d.quantity.to_string(),
            received: d.received_date.map(|d| d.to_string()).unwrap_or_default(),
            expires: d.expiry_date.map(|d| d.to_string()).unwrap_or_default(),
            status: d.status.clone().unwrap_or_default(),
        }
    }
}

fn filters(list: &ListArgs, args: InventoryFilterArgs) -> InventoryFilters {
    InventoryFilters {
        keyword: list.keyword.clone(),
        warehouse_ids: util::record_ids(&args.warehouse_ids),
        customer_ids: util::record_ids(&args.customer_ids),
        sku_code_base: args.sku_code_base,
        in_stock_only: args.in_stock_only,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    depot: &Depot,
    args: InventoryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let inventory = depot.inventory();
    match args.command {
        InventoryCommand::Summary { list, filters: f } => {
            let params = util::list_params(&list, filters(&list, f))?;
            let state = inventory.fetch_summary(&params).await?;
            let out = output::render_page(
                global,
                &state,
                |s| SummaryRow::from(s),
                |s| s.item_id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InventoryCommand::Details { item_id, list } => {
            let params = util::list_params(&list, ())?;
            let state = inventory
                .fetch_details(&RecordId::from(item_id), &params)
                .await?;
            let out = output::render_page(
                global,
                &state,
                |d| DetailRow::from(d),
                |d| d.lot_number.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        InventoryCommand::Export {
            list,
            filters: f,
            export,
        } => {
            let params = util::list_params(&list, filters(&list, f))?;
            let format = util::export_format(export.format);
            let bar = util::spinner("Exporting inventory summary", global.quiet);
            let result = inventory.export_summary(&params, format).await;
            bar.finish_and_clear();
            finish_export(global, result?, &export.out_dir)
        }
    }
}
