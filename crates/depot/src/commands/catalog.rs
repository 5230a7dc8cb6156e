//! Catalog command handlers.

use tabled::Tabled;

use depot_core::{BatchRegistry, Bom, CatalogFilters, Depot, Sku};

use crate::cli::{CatalogArgs, CatalogCommand, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct BomRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "BOM")]
    code: String,
    #[tabled(rename = "Parent SKU")]
    parent: String,
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Bom> for BomRow {
    fn from(b: &Bom) -> Self {
        Self {
            id: b.id.to_string(),
            code: b.bom_code.clone(),
            parent: b.parent_sku.clone(),
            component: b.component_sku.clone().unwrap_or_default(),
            quantity: b.quantity.to_string(),
            status: b.status.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct SkuRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SKU")]
    code: String,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "UoM")]
    uom: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Sku> for SkuRow {
    fn from(s: &Sku) -> Self {
        Self {
            id: s.id.to_string(),
            code: s.sku_code.clone(),
            base: s.code_base.clone().unwrap_or_default(),
            description: s.description.clone().unwrap_or_default(),
            uom: s.uom.clone().unwrap_or_default(),
            status: s.status.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct BatchRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Batch")]
    batch: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Warehouse")]
    warehouse: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&BatchRegistry> for BatchRow {
    fn from(b: &BatchRegistry) -> Self {
        Self {
            id: b.id.to_string(),
            batch: b.batch_number.clone(),
            sku: b.sku_code.clone().unwrap_or_default(),
            customer: b.customer_name.clone().unwrap_or_default(),
            warehouse: b.warehouse_name.clone().unwrap_or_default(),
            status: b.status.clone().unwrap_or_default(),
        }
    }
}

fn filters(list: &ListArgs, status: Option<String>) -> CatalogFilters {
    CatalogFilters {
        keyword: list.keyword.clone(),
        status,
    }
}

pub async fn handle(depot: &Depot, args: CatalogArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let catalog = depot.catalog();
    let out = match args.command {
        CatalogCommand::Boms { list, status } => {
            let params = util::list_params(&list, filters(&list, status))?;
            let state = catalog.fetch_boms(&params).await?;
            output::render_page(global, &state, |b| BomRow::from(b), |b| b.bom_code.clone())?
        }
        CatalogCommand::Skus { list, status } => {
            let params = util::list_params(&list, filters(&list, status))?;
            let state = catalog.fetch_skus(&params).await?;
            output::render_page(global, &state, |s| SkuRow::from(s), |s| s.sku_code.clone())?
        }
        CatalogCommand::Batches { list, status } => {
            let params = util::list_params(&list, filters(&list, status))?;
            let state = catalog.fetch_batches(&params).await?;
            output::render_page(
                global,
                &state,
                |b| BatchRow::from(b),
                |b| b.batch_number.clone(),
            )?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
