// ── Typed filter records ──
//
// Each feature holds its own filter record. Records turn into the wire
// `Filters` map through `ToFilters`; empty fields vanish during
// serialization, so the records can be built straight from CLI flags.

use depot_api::{ApiPage, Filters, ListQuery, RecordId, Sort};

use crate::dates::DateRange;

/// Conversion of a filter record into query filters.
pub trait ToFilters {
    fn to_filters(&self) -> Filters;
}

impl ToFilters for Filters {
    fn to_filters(&self) -> Filters {
        self.clone()
    }
}

impl ToFilters for () {
    fn to_filters(&self) -> Filters {
        Filters::new()
    }
}

fn ids(values: &[RecordId]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressFilters {
    pub keyword: Option<String>,
    pub country: Option<String>,
    pub address_type: Option<String>,
    pub customer_ids: Vec<RecordId>,
}

impl ToFilters for AddressFilters {
    fn to_filters(&self) -> Filters {
        let mut f = Filters::new();
        f.set_opt("keyword", self.keyword.clone())
            .set_opt("country", self.country.clone())
            .set_opt("addressType", self.address_type.clone())
            .set("customerIds", ids(&self.customer_ids));
        f
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilters {
    pub keyword: Option<String>,
    pub status: Option<String>,
    pub country: Option<String>,
}

impl ToFilters for CustomerFilters {
    fn to_filters(&self) -> Filters {
        let mut f = Filters::new();
        f.set_opt("keyword", self.keyword.clone())
            .set_opt("status", self.status.clone())
            .set_opt("country", self.country.clone());
        f
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryFilters {
    pub keyword: Option<String>,
    pub warehouse_ids: Vec<RecordId>,
    pub customer_ids: Vec<RecordId>,
    pub sku_code_base: Option<String>,
    /// Only rows with stock on hand. Omitted from the query when `false`.
    pub in_stock_only: bool,
}

impl ToFilters for InventoryFilters {
    fn to_filters(&self) -> Filters {
        let mut f = Filters::new();
        f.set_opt("keyword", self.keyword.clone())
            .set("warehouseIds", ids(&self.warehouse_ids))
            .set("customerIds", ids(&self.customer_ids))
            .set_opt("skuCodeBase", self.sku_code_base.clone())
            .set_opt("inStockOnly", self.in_stock_only.then_some(true));
        f
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityLogFilters {
    pub keyword: Option<String>,
    pub range: DateRange,
    pub warehouse_ids: Vec<RecordId>,
    pub customer_ids: Vec<RecordId>,
    pub activity_types: Vec<String>,
    pub lot_number: Option<String>,
    pub batch_number: Option<String>,
}

impl ToFilters for ActivityLogFilters {
    fn to_filters(&self) -> Filters {
        let mut f = Filters::new();
        f.set_opt("keyword", self.keyword.clone())
            .set("warehouseIds", ids(&self.warehouse_ids))
            .set("customerIds", ids(&self.customer_ids))
            .set("activityTypes", self.activity_types.clone())
            .set_opt("lotNumber", self.lot_number.clone())
            .set_opt("batchNumber", self.batch_number.clone());
        self.range.apply(&mut f);
        f
    }
}

/// Filters shared by the BOM, SKU, and batch registry lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilters {
    pub keyword: Option<String>,
    pub status: Option<String>,
}

impl ToFilters for CatalogFilters {
    fn to_filters(&self) -> Filters {
        let mut f = Filters::new();
        f.set_opt("keyword", self.keyword.clone())
            .set_opt("status", self.status.clone());
        f
    }
}

// ── List parameters ──────────────────────────────────────────────────

/// What a caller passes to a feature's `fetch`: paging, sort, and a
/// typed filter record. Missing values fall back to the feature defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams<F> {
    pub page: ApiPage,
    pub limit: Option<u32>,
    pub sort: Option<Sort>,
    pub filters: F,
}

impl<F: ToFilters> ListParams<F> {
    pub fn new(filters: F) -> Self {
        Self {
            page: ApiPage::FIRST,
            limit: None,
            sort: None,
            filters,
        }
    }

    pub fn page(mut self, page: ApiPage) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Build the wire query; a zero or missing limit uses `default_limit`.
    pub fn to_query(&self, default_limit: u32) -> ListQuery {
        let limit = self.limit.filter(|l| *l > 0).unwrap_or(default_limit);
        let mut query = ListQuery::new(self.page, limit).with_filters(self.filters.to_filters());
        query.sort = self.sort.clone();
        query
    }
}
