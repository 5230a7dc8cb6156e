// Response envelopes
//
// Every list endpoint wraps its payload as
// `{ success, message, data: [...], pagination: {...} }`; mutation endpoints
// drop `pagination` and may return `data` as either one object or an array.
// Fields default liberally because not every endpoint sends every key.

use serde::{Deserialize, Deserializer, Serialize};

// ── Pagination metadata ──────────────────────────────────────────────

/// Pagination block of a list envelope, exactly as the server sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_records: u64,
    /// Some endpoints send 0 for an empty result, others 1.
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl PageMeta {
    /// Metadata for a list that has not been fetched yet.
    pub fn empty(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total_records: 0,
            total_pages: 0,
        }
    }

    /// Number of pages to render in pagination controls; never less than 1.
    pub fn page_count(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

// ── List envelope ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ListEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<PageMeta>,
}

/// One page of records plus the server's pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

// ── Mutation envelope ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct MutationEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "OneOrMany::none")]
    pub data: OneOrMany<T>,
}

/// `data` of a mutation response: a single object, an array, or null.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
    None,
}

impl<T> OneOrMany<T> {
    fn none() -> Self {
        Self::None
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(t) => vec![t],
            Self::None => Vec::new(),
        }
    }
}

/// Normalized result of a create call: always a vector of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationResult<T> {
    pub data: Vec<T>,
    pub success: bool,
    pub message: Option<String>,
}

// ── Error body ───────────────────────────────────────────────────────

/// Error payloads come in two shapes: flat `{message, code, type}` or
/// nested `{error: {message, code, type}}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ErrorBody {
    /// Collapse both shapes into `(message, code, kind)`; the nested shape wins.
    pub fn into_parts(self) -> (Option<String>, Option<String>, Option<String>) {
        let (message, code, kind) = match self.error {
            Some(detail) => (
                detail.message.or(self.message),
                detail.code.or(self.code),
                detail.kind.or(self.kind),
            ),
            None => (self.message, self.code, self.kind),
        };
        let code = code.and_then(|c| match c {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        (message.filter(|m| !m.trim().is_empty()), code, kind)
    }
}

fn default_success() -> bool {
    true
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
