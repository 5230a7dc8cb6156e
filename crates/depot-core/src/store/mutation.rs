// ── Mutation (create) container ──
//
// Tracks one create operation: the normalized array of created records plus
// the envelope's `success` / `message`. Never touches any list container;
// callers refetch lists themselves.

use std::future::Future;
use std::sync::Arc;

use depot_api::MutationResult;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::stream::StateStream;

/// Point-in-time view of a mutation container.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationState<T> {
    /// Created records, always a vector; `None` until a create succeeds.
    pub data: Option<Vec<T>>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<bool>,
    pub message: Option<String>,
}

impl<T> Default for MutationState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            success: None,
            message: None,
        }
    }
}

/// A reactive container for one create operation.
pub struct MutationContainer<T: Clone + Send + Sync + 'static> {
    label: &'static str,
    state: watch::Sender<Arc<MutationState<T>>>,
}

impl<T: Clone + Send + Sync + 'static> MutationContainer<T> {
    pub fn new(label: &'static str) -> Self {
        let (state, _) = watch::channel(Arc::new(MutationState::default()));
        Self { label, state }
    }

    pub fn snapshot(&self) -> Arc<MutationState<T>> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream<MutationState<T>> {
        StateStream::new(self.state.subscribe())
    }

    /// Run one create call through the container.
    pub async fn run<F>(&self, create: F) -> Result<Arc<MutationState<T>>, CoreError>
    where
        F: Future<Output = Result<MutationResult<T>, depot_api::Error>>,
    {
        self.begin();
        match create.await {
            Ok(result) => {
                info!(
                    entity = self.label,
                    created = result.data.len(),
                    "create fulfilled"
                );
                let next = Arc::new(MutationState {
                    data: Some(result.data),
                    loading: false,
                    error: None,
                    success: Some(result.success),
                    message: result.message,
                });
                self.state.send_modify(|s| *s = next);
                Ok(self.snapshot())
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Record a failure that happened before any request was sent.
    pub(crate) fn fail(&self, err: &CoreError) {
        let message = err.display_message(&format!("Failed to add {}", self.label));
        warn!(entity = self.label, error = %message, "create rejected");
        self.state.send_modify(|s| {
            *s = Arc::new(MutationState {
                data: None,
                loading: false,
                error: Some(message),
                success: Some(false),
                message: None,
            });
        });
    }

    /// Clear data, flags, and error.
    pub fn reset(&self) {
        self.state
            .send_modify(|s| *s = Arc::new(MutationState::default()));
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            *s = Arc::new(MutationState {
                loading: true,
                ..MutationState::default()
            });
        });
    }
}
