use thiserror::Error;

/// Top-level error type for the `depot-api` crate.
///
/// Covers every failure mode of the service layer: transport, server-side
/// validation and business errors, envelope decoding, and client-side
/// preconditions raised before a request is sent. `depot-core` reduces these
/// to the display strings stored in its containers.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server rejected the bearer token (HTTP 401).
    #[error("Unauthorized -- the API token was rejected")]
    Unauthorized,

    /// The token is valid but lacks permission (HTTP 403).
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Structured error body from the server (`{message, code, type}`).
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        kind: Option<String>,
    },

    /// HTTP 2xx whose envelope carried `success: false`.
    #[error("Request unsuccessful: {message}")]
    Unsuccessful { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Client-side preconditions ───────────────────────────────────
    /// Request rejected before it was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// The server-provided message, if the server sent one.
    ///
    /// This is the first choice when reducing an error to a display string;
    /// transport and decoding failures have no server message.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. }
            | Self::Unsuccessful { message }
            | Self::Forbidden { message } => Some(message.as_str()).filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// HTTP status code, if the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a transient error worth retrying by hand.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Extract the API error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_structured_body() {
        let err = Error::Api {
            status: 422,
            message: "addressLine1 is required".into(),
            code: Some("VALIDATION".into()),
            kind: Some("ValidationError".into()),
        };
        assert_eq!(err.server_message(), Some("addressLine1 is required"));
        assert_eq!(err.api_error_code(), Some("VALIDATION"));
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn empty_server_message_is_ignored() {
        let err = Error::Unsuccessful {
            message: String::new(),
        };
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn client_side_errors_have_no_status() {
        let err = Error::InvalidRequest("customerIds length mismatch".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Api {
            status: 503,
            message: "maintenance".into(),
            code: None,
            kind: None,
        };
        assert!(err.is_transient());
    }
}
