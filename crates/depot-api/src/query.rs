// Canonical query-string serialization.
//
// Every list, export, and lookup request goes through this module, so the
// wire conventions are decided once:
//
// - keys are sent exactly as given (camelCase, as the backend expects)
// - `None`, empty strings, and empty lists are omitted
// - multi-value filters become repeated keys: `ids=1&ids=2`
// - nested filter records are flattened into top-level keys; a key set at
//   the outer level wins over a nested key with the same name
// - dates are RFC 3339 UTC with millisecond precision

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::paging::ApiPage;

/// Keys owned by pagination and sorting; filters cannot override them.
const RESERVED_KEYS: &[&str] = &["page", "limit", "sortBy", "sortOrder", "exportFormat"];

// ── Filter values ────────────────────────────────────────────────────

/// A single filter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Date(DateTime<Utc>),
    Many(Vec<String>),
    Nested(Filters),
}

impl FilterValue {
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Many(v) => v.iter().all(|s| s.trim().is_empty()),
            Self::Nested(f) => f.is_empty(),
            Self::Integer(_) | Self::Bool(_) | Self::Date(_) => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

impl From<Filters> for FilterValue {
    fn from(v: Filters) -> Self {
        Self::Nested(v)
    }
}

/// Format a timestamp the way every date filter is sent.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ── Filters ──────────────────────────────────────────────────────────

/// A feature-specific filter record, possibly nested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(BTreeMap<String, FilterValue>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter, replacing any previous value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a filter only when a value is present.
    pub fn set_opt<V: Into<FilterValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.set(key, v);
        }
        self
    }

    /// Builder-style `set`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    /// `true` when nothing would be serialized.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(FilterValue::is_empty)
    }

    /// Flatten into query pairs per the module conventions.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut seen = HashSet::new();
        self.flatten_into(&mut pairs, &mut seen);
        pairs
    }

    fn flatten_into(&self, pairs: &mut Vec<(String, String)>, seen: &mut HashSet<String>) {
        // Scalars at this level claim their keys before any nested record
        // gets a chance to.
        let mut nested = Vec::new();
        for (key, value) in &self.0 {
            if value.is_empty() || seen.contains(key) {
                continue;
            }
            match value {
                FilterValue::Nested(inner) => nested.push(inner),
                other => {
                    seen.insert(key.clone());
                    push_value(pairs, key, other);
                }
            }
        }
        for inner in nested {
            inner.flatten_into(pairs, seen);
        }
    }
}

fn push_value(pairs: &mut Vec<(String, String)>, key: &str, value: &FilterValue) {
    match value {
        FilterValue::Text(s) => pairs.push((key.to_owned(), s.trim().to_owned())),
        FilterValue::Integer(n) => pairs.push((key.to_owned(), n.to_string())),
        FilterValue::Bool(b) => pairs.push((key.to_owned(), b.to_string())),
        FilterValue::Date(ts) => pairs.push((key.to_owned(), format_timestamp(ts))),
        FilterValue::Many(values) => {
            for v in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
                pairs.push((key.to_owned(), v.to_owned()));
            }
        }
        FilterValue::Nested(_) => {}
    }
}

// ── Sorting ──────────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub by: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(by: impl Into<String>, order: SortOrder) -> Self {
        Self {
            by: by.into(),
            order,
        }
    }
}

// ── List queries ─────────────────────────────────────────────────────

/// Parameters of a paginated list fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: ApiPage,
    pub limit: u32,
    pub sort: Option<Sort>,
    pub filters: Filters,
}

impl ListQuery {
    pub const DEFAULT_LIMIT: u32 = 25;

    pub fn new(page: ApiPage, limit: u32) -> Self {
        Self {
            page,
            limit,
            sort: None,
            filters: Filters::new(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Query pairs in wire order: paging, sorting, then filters.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_owned(), self.page.to_string()),
            ("limit".to_owned(), self.limit.to_string()),
        ];
        push_sort(&mut pairs, self.sort.as_ref());
        push_filters(&mut pairs, &self.filters);
        pairs
    }

    /// Drop paging and attach an export format.
    pub fn for_export(&self, format: ExportFormat) -> ExportQuery {
        ExportQuery {
            format,
            sort: self.sort.clone(),
            filters: self.filters.clone(),
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(ApiPage::FIRST, Self::DEFAULT_LIMIT)
    }
}

// ── Export queries ───────────────────────────────────────────────────

/// File formats the export endpoints can render.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Csv,
    Pdf,
    Txt,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        self.into()
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
            Self::Txt => "text/plain",
        }
    }
}

/// The active filter/sort state of a list, minus paging, plus a format.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportQuery {
    pub format: ExportFormat,
    pub sort: Option<Sort>,
    pub filters: Filters,
}

impl ExportQuery {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("exportFormat".to_owned(), self.format.to_string())];
        push_sort(&mut pairs, self.sort.as_ref());
        push_filters(&mut pairs, &self.filters);
        pairs
    }
}

// ── Lookup queries ───────────────────────────────────────────────────

/// Parameters of a typeahead lookup page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupQuery {
    pub keyword: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl LookupQuery {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(keyword) = self.keyword.as_deref().map(str::trim) {
            if !keyword.is_empty() {
                pairs.push(("keyword".to_owned(), keyword.to_owned()));
            }
        }
        pairs.push(("limit".to_owned(), self.limit.to_string()));
        pairs.push(("offset".to_owned(), self.offset.to_string()));
        pairs
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn push_sort(pairs: &mut Vec<(String, String)>, sort: Option<&Sort>) {
    if let Some(sort) = sort {
        if !sort.by.trim().is_empty() {
            pairs.push(("sortBy".to_owned(), sort.by.trim().to_owned()));
            pairs.push(("sortOrder".to_owned(), sort.order.to_string()));
        }
    }
}

fn push_filters(pairs: &mut Vec<(String, String)>, filters: &Filters) {
    pairs.extend(
        filters
            .to_pairs()
            .into_iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str())),
    );
}
