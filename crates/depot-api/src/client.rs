// HTTP client for the Depot REST API
//
// Wraps `reqwest::Client` with base-URL joining, request-id tagging,
// envelope unwrapping, and error-body parsing. Endpoint groups live in
// sibling modules as inherent methods so this file stays focused on
// transport mechanics.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::envelope::{ErrorBody, ListEnvelope, MutationEnvelope, MutationResult, Page, PageMeta};
use crate::error::Error;
use crate::query::{ExportQuery, ListQuery};
use crate::transport::TransportConfig;

const REQUEST_ID_HEADER: &str = "X-Request-Id";
const PREVIEW_LEN: usize = 200;

/// Raw bytes of an export download.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    /// Filename from `Content-Disposition`, when the server sent one.
    pub suggested_filename: Option<String>,
}

/// Async client for the Depot REST API.
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections
/// internally.
#[derive(Debug, Clone)]
pub struct DepotClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl DepotClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            timeout: transport.timeout,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            timeout: Duration::from_secs(30),
        })
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a paginated list and unwrap its envelope.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<Page<T>, Error> {
        let params = query.to_pairs();
        let envelope: ListEnvelope<T> = self.get_json(path, &params).await?;
        if !envelope.success {
            return Err(unsuccessful(envelope.message));
        }

        let pagination = envelope.pagination.unwrap_or_else(|| PageMeta {
            page: query.page.get(),
            limit: query.limit,
            total_records: u64::try_from(envelope.data.len()).unwrap_or(u64::MAX),
            total_pages: u32::from(!envelope.data.is_empty()),
        });

        Ok(Page {
            items: envelope.data,
            pagination,
        })
    }

    /// GET any JSON list envelope with raw query pairs.
    pub(crate) async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<(Vec<T>, Option<PageMeta>), Error> {
        let envelope: ListEnvelope<T> = self.get_json(path, params).await?;
        if !envelope.success {
            return Err(unsuccessful(envelope.message));
        }
        Ok((envelope.data, envelope.pagination))
    }

    /// POST an array body and normalize the mutation envelope.
    pub(crate) async fn post_create<T, B>(
        &self,
        path: &str,
        body: &[B],
    ) -> Result<MutationResult<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        if body.is_empty() {
            return Err(Error::InvalidRequest("nothing to create".into()));
        }

        let url = self.url(path)?;
        let request_id = Uuid::new_v4();
        debug!(%request_id, records = body.len(), "POST {url}");

        let builder = self
            .http
            .post(url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(body);
        let resp = self.send(builder).await?;
        let envelope: MutationEnvelope<T> = self.handle_json(resp).await?;
        if !envelope.success {
            return Err(unsuccessful(envelope.message));
        }

        Ok(MutationResult {
            data: envelope.data.into_vec(),
            success: envelope.success,
            message: envelope.message,
        })
    }

    /// GET a raw file payload.
    pub(crate) async fn get_export(
        &self,
        path: &str,
        query: &ExportQuery,
    ) -> Result<ExportPayload, Error> {
        let url = self.url(path)?;
        let params = query.to_pairs();
        let request_id = Uuid::new_v4();
        debug!(%request_id, ?params, "GET {url} (export)");

        let builder = self
            .http
            .get(url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .query(&params);
        let resp = self.send(builder).await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(parse_error(status, resp).await);
        }

        let headers = resp.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let suggested_filename = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition);

        let bytes = resp.bytes().await.map_err(|e| self.transport_error(e))?;

        // A JSON body on an export route is an error envelope served with 200.
        if content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
        {
            let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
            let (message, _, _) = body.into_parts();
            return Err(unsuccessful(message));
        }

        Ok(ExportPayload {
            bytes,
            content_type,
            suggested_filename,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        let request_id = Uuid::new_v4();
        debug!(%request_id, ?params, "GET {url}");

        let builder = self
            .http
            .get(url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .query(params);
        let resp = self.send(builder).await?;
        self.handle_json(resp).await
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        builder.send().await.map_err(|e| self.transport_error(e))
    }

    /// Timeouts report the configured duration, including those hit while
    /// reading the body.
    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(e)
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_json<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(parse_error(status, resp).await);
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(PREVIEW_LEN).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

// ── Error parsing ────────────────────────────────────────────────────

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    let body: Option<ErrorBody> = serde_json::from_str(&raw).ok();
    let (message, code, kind) = body.map(ErrorBody::into_parts).unwrap_or_default();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Unauthorized;
    }
    if status == reqwest::StatusCode::FORBIDDEN {
        return Error::Forbidden {
            message: message.unwrap_or_else(|| "insufficient permissions".into()),
        };
    }

    let message = message.unwrap_or_else(|| {
        if raw.trim().is_empty() || raw.trim_start().starts_with('<') {
            status.to_string()
        } else {
            raw.chars().take(PREVIEW_LEN).collect()
        }
    });

    Error::Api {
        status: status.as_u16(),
        message,
        code,
        kind,
    }
}

fn unsuccessful(message: Option<String>) -> Error {
    Error::Unsuccessful {
        message: message.unwrap_or_default(),
    }
}

/// Pull `filename="..."` out of a `Content-Disposition` header.
fn filename_from_disposition(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        let value = part.strip_prefix("filename=")?;
        let value = value.trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_owned())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            DepotClient::from_reqwest("https://wms.example.com/api/v1", reqwest::Client::new())
                .unwrap();
        assert_eq!(client.base_url().as_str(), "https://wms.example.com/api/v1/");
        assert_eq!(
            client.url("/addresses").unwrap().as_str(),
            "https://wms.example.com/api/v1/addresses"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = DepotClient::from_reqwest("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn disposition_filename_is_extracted() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="activity_2024-03-01.csv""#),
            Some("activity_2024-03-01.csv".into())
        );
        assert_eq!(filename_from_disposition("inline"), None);
    }
}
