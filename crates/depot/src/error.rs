//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use depot_config::ConfigError;
use depot_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to server at {url}")]
    #[diagnostic(
        code(depot::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Reason: {reason}\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request failed: {reason}")]
    #[diagnostic(
        code(depot::request_failed),
        help("Run again with -vv to see the request that failed.")
    )]
    RequestFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(depot::auth_failed),
        help(
            "Verify the API token for profile '{profile}'.\n\
             Store a new one with: depot config set-token --profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("Permission denied: {message}")]
    #[diagnostic(
        code(depot::permission_denied),
        help("The token is valid but lacks access to this resource.")
    )]
    PermissionDenied { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(code(depot::not_found))]
    NotFound { message: String },

    // ── Server rejections ────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(depot::rejected))]
    Rejected {
        message: String,
        #[help]
        hint: Option<String>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(depot::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(depot::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: depot config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(depot::no_config),
        help(
            "Create a profile with: depot config init\n\
             Or pass --server / set DEPOT_SERVER.\n\
             Config file: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(depot::config))]
    Config(#[from] ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(depot::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(depot::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unexpected error: {0}")]
    #[diagnostic(code(depot::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::PermissionDenied { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::RequestFailed { reason, .. } => CliError::RequestFailed { reason },
            CoreError::AuthenticationFailed { message: _ } => CliError::AuthFailed {
                profile: "current".into(),
            },
            CoreError::PermissionDenied { message } => CliError::PermissionDenied { message },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::NotFound { message } => CliError::NotFound { message },
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            rejected @ CoreError::Rejected { .. } => {
                let message = rejected.display_message("Request rejected by server");
                let CoreError::Rejected { code, .. } = rejected else {
                    return CliError::Internal(message);
                };
                CliError::Rejected {
                    message,
                    hint: code.map(|c| format!("Server code: {c}")),
                }
            }
            CoreError::Config { message } => CliError::Validation {
                field: "server".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        let cases = [
            (
                CoreError::AuthenticationFailed {
                    message: String::new(),
                },
                exit_code::AUTH,
            ),
            (
                CoreError::NotFound {
                    message: "item 9".into(),
                },
                exit_code::NOT_FOUND,
            ),
            (CoreError::Timeout { timeout_secs: 5 }, exit_code::TIMEOUT),
            (
                CoreError::ConnectionFailed {
                    url: "http://x".into(),
                    reason: "refused".into(),
                },
                exit_code::CONNECTION,
            ),
            (
                CoreError::ValidationFailed {
                    message: "bad".into(),
                },
                exit_code::USAGE,
            ),
            (
                CoreError::RequestFailed {
                    reason: "builder error".into(),
                    status: None,
                },
                exit_code::GENERAL,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }

    #[test]
    fn rejection_without_message_uses_fallback() {
        let err = CliError::from(CoreError::Rejected {
            message: None,
            code: Some("DUPLICATE".into()),
            kind: None,
            status: Some(409),
        });
        assert_eq!(err.to_string(), "Request rejected by server");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
