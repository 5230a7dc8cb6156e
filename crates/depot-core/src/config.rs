// ── Runtime client configuration ──
//
// These types describe *how* to reach a Depot server. They carry the
// credential and connection tuning, but never touch disk. The CLI builds a
// `ClientConfig` (usually through `depot-config`) and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use depot_api::transport::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (staging servers with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one Depot server.
///
/// Built by the CLI, passed to [`Depot`](crate::Depot) -- core never reads
/// config files.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g. `https://wms.example.com/api/v1`).
    pub url: Url,
    /// Bearer token, if the server requires one.
    pub token: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Default page size for entity lists.
    pub page_size: u32,
    /// Default page size for reports.
    pub report_page_size: u32,
    /// Options fetched per lookup page.
    pub lookup_limit: u32,
    /// Quiet period before a keystroke-driven lookup fires.
    pub lookup_debounce: Duration,
}

impl ClientConfig {
    pub const DEFAULT_PAGE_SIZE: u32 = 25;
    pub const DEFAULT_REPORT_PAGE_SIZE: u32 = 50;
    pub const DEFAULT_LOOKUP_LIMIT: u32 = 10;
    pub const DEFAULT_LOOKUP_DEBOUNCE: Duration = Duration::from_millis(300);

    /// A config with defaults for everything but the URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: Self::DEFAULT_PAGE_SIZE,
            report_page_size: Self::DEFAULT_REPORT_PAGE_SIZE,
            lookup_limit: Self::DEFAULT_LOOKUP_LIMIT,
            lookup_debounce: Self::DEFAULT_LOOKUP_DEBOUNCE,
        }
    }

    /// Translate into the api-level transport settings.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
            token: self.token.clone(),
        }
    }
}
