// Lookup (typeahead) endpoints
//
// All lookups share one shape: `GET /lookups/{kind}?keyword=&limit=&offset=`
// returning `{value, label, ...}` options.

use tracing::debug;

use crate::client::DepotClient;
use crate::endpoints::{self, LookupKind};
use crate::error::Error;
use crate::query::LookupQuery;
use crate::types::LookupOption;

/// One page of lookup options.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupPage {
    pub options: Vec<LookupOption>,
    /// Whether another `offset` page is likely to return more options.
    pub has_more: bool,
}

impl DepotClient {
    /// `GET /lookups/{kind}`
    pub async fn lookup(&self, kind: LookupKind, query: &LookupQuery) -> Result<LookupPage, Error> {
        debug!(%kind, keyword = ?query.keyword, offset = query.offset, "lookup");
        let (options, pagination) = self
            .get_envelope::<LookupOption>(&endpoints::lookup(kind), &query.to_pairs())
            .await?;

        let has_more = match pagination {
            Some(meta) => meta.has_next(),
            None => {
                query.limit > 0 && u32::try_from(options.len()).unwrap_or(u32::MAX) >= query.limit
            }
        };

        Ok(LookupPage { options, has_more })
    }
}
