// ── Core error types ──
//
// User-facing errors from depot-core. Consumers never match on HTTP
// details directly; the `From<depot_api::Error>` impl folds transport-layer
// failures into these categories, and `display_message` reduces any of them
// to the single string a container stores.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The request never produced a usable response (builder, redirect,
    /// or body errors).
    #[error("Request failed: {reason}")]
    RequestFailed { reason: String, status: Option<u16> },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// Client-side precondition failure, raised before any request.
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The server refused the request with a business or validation error.
    #[error("{}", .message.as_deref().unwrap_or("Request rejected by server"))]
    Rejected {
        message: Option<String>,
        /// Server error code (e.g. `"DUPLICATE"`).
        code: Option<String>,
        /// Server error type (e.g. `"ValidationError"`).
        kind: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message the server sent, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                message: Some(m), ..
            } if !m.trim().is_empty() => Some(m.as_str()),
            Self::PermissionDenied { message } | Self::NotFound { message }
                if !message.trim().is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Reduce this error to the string stored in a container's `error` field.
    ///
    /// Priority: the server's message, then this error's own text, then
    /// `fallback` when neither says anything useful.
    pub fn display_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_owned();
        }
        match self {
            Self::Rejected { message: None, .. } => fallback.to_owned(),
            other => {
                let text = other.to_string();
                if text.trim().is_empty() {
                    fallback.to_owned()
                } else {
                    text
                }
            }
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<depot_api::Error> for CoreError {
    fn from(err: depot_api::Error) -> Self {
        match err {
            depot_api::Error::Unauthorized => CoreError::AuthenticationFailed {
                message: "the API token was rejected".into(),
            },
            depot_api::Error::Forbidden { message } => CoreError::PermissionDenied { message },
            depot_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::RequestFailed {
                        reason: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            depot_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            depot_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            depot_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            depot_api::Error::Api {
                status: 404,
                message,
                ..
            } => CoreError::NotFound { message },
            depot_api::Error::Api {
                status,
                message,
                code,
                kind,
            } => CoreError::Rejected {
                message: Some(message),
                code,
                kind,
                status: Some(status),
            },
            depot_api::Error::Unsuccessful { message } => CoreError::Rejected {
                message: Some(message).filter(|m| !m.trim().is_empty()),
                code: None,
                kind: None,
                status: None,
            },
            depot_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response from server: {message}"))
            }
            depot_api::Error::InvalidRequest(message) => CoreError::ValidationFailed { message },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn server_message_has_priority() {
        let err = CoreError::from(depot_api::Error::Api {
            status: 422,
            message: "Postal code is invalid".into(),
            code: None,
            kind: Some("ValidationError".into()),
        });
        assert_eq!(err.display_message("Failed to add address"), "Postal code is invalid");
    }

    #[test]
    fn generic_message_when_server_is_silent() {
        let err = CoreError::from(depot_api::Error::Timeout { timeout_secs: 30 });
        assert_eq!(
            err.display_message("Failed to fetch addresses"),
            "Request timed out after 30s"
        );
    }

    #[test]
    fn transport_failure_keeps_its_own_text() {
        let builder_err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let text = builder_err.to_string();
        let err = CoreError::from(depot_api::Error::Transport(builder_err));

        assert!(matches!(err, CoreError::RequestFailed { status: None, .. }));
        let message = err.display_message("Failed to fetch addresses");
        assert_eq!(message, format!("Request failed: {text}"));
        assert_ne!(message, "Failed to fetch addresses");
    }

    #[test]
    fn fallback_when_nothing_useful() {
        let err = CoreError::from(depot_api::Error::Unsuccessful {
            message: "  ".into(),
        });
        assert_eq!(
            err.display_message("Failed to fetch customers"),
            "Failed to fetch customers"
        );
    }

    #[test]
    fn not_found_maps_from_404() {
        let err = CoreError::from(depot_api::Error::Api {
            status: 404,
            message: "Item ITM-1 not found".into(),
            code: None,
            kind: None,
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(err.display_message("x"), "Item ITM-1 not found");
    }

    #[test]
    fn client_precondition_is_validation() {
        let err = CoreError::from(depot_api::Error::InvalidRequest("nothing to create".into()));
        assert_eq!(err.display_message("x"), "Validation failed: nothing to create");
    }
}
