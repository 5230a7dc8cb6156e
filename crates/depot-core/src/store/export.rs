// ── Export container ──
//
// Export state lives apart from the list it exports: a failed download sets
// `export_error` and leaves the list's own `error` alone.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDate;
use depot_api::{ExportFormat, ExportPayload};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::stream::StateStream;

/// A downloaded export, ready to be written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// `{token}_{YYYY-MM-DD}.{ext}`
pub fn export_filename(token: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!("{token}_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Point-in-time view of an export container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportState {
    pub exporting: bool,
    pub export_error: Option<String>,
    /// Name and size of the last successful export.
    pub last_export: Option<(String, usize)>,
}

pub struct ExportContainer {
    /// Report or category token used in filenames and logs.
    token: &'static str,
    state: watch::Sender<Arc<ExportState>>,
}

impl ExportContainer {
    pub fn new(token: &'static str) -> Self {
        let (state, _) = watch::channel(Arc::new(ExportState::default()));
        Self { token, state }
    }

    pub fn token(&self) -> &'static str {
        self.token
    }

    pub fn snapshot(&self) -> Arc<ExportState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream<ExportState> {
        StateStream::new(self.state.subscribe())
    }

    /// Run one export download through the container.
    pub async fn run<F>(
        &self,
        format: ExportFormat,
        date: NaiveDate,
        download: F,
    ) -> Result<ExportFile, CoreError>
    where
        F: Future<Output = Result<ExportPayload, depot_api::Error>>,
    {
        self.state.send_modify(|s| {
            *s = Arc::new(ExportState {
                exporting: true,
                export_error: None,
                last_export: s.last_export.clone(),
            });
        });

        match download.await {
            Ok(payload) => {
                let file = ExportFile {
                    filename: export_filename(self.token, date, format),
                    content_type: payload
                        .content_type
                        .unwrap_or_else(|| format.content_type().to_owned()),
                    bytes: payload.bytes,
                };
                info!(
                    report = self.token,
                    filename = %file.filename,
                    bytes = file.bytes.len(),
                    "export ready"
                );
                let last = Some((file.filename.clone(), file.bytes.len()));
                self.state.send_modify(|s| {
                    *s = Arc::new(ExportState {
                        exporting: false,
                        export_error: None,
                        last_export: last,
                    });
                });
                Ok(file)
            }
            Err(err) => {
                let err = CoreError::from(err);
                let message = err.display_message(&format!("Failed to export {}", self.token));
                warn!(report = self.token, error = %message, "export failed");
                self.state.send_modify(|s| {
                    *s = Arc::new(ExportState {
                        exporting: false,
                        export_error: Some(message),
                        last_export: s.last_export.clone(),
                    });
                });
                Err(err)
            }
        }
    }

    pub fn reset(&self) {
        self.state.send_modify(|s| *s = Arc::new(ExportState::default()));
    }
}
