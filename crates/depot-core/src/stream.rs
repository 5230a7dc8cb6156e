// ── Container subscriptions ──
//
// `ListContainer`, `MutationContainer`, `ExportContainer` and
// `LookupSession` all publish `Arc` snapshots on a watch channel. A
// subscriber holds a `StateStream` and re-reads whichever snapshot it last
// saw; the channel only keeps the newest value, so a slow reader skips
// intermediate loading states rather than queueing them.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Subscription to one container's snapshots.
pub struct StateStream<S: Send + Sync + 'static> {
    seen: Arc<S>,
    rx: watch::Receiver<Arc<S>>,
}

impl<S: Send + Sync + 'static> StateStream<S> {
    pub(crate) fn new(rx: watch::Receiver<Arc<S>>) -> Self {
        let seen = rx.borrow().clone();
        Self { seen, rx }
    }

    /// Snapshot as of subscription or the last [`changed`](Self::changed).
    pub fn current(&self) -> &Arc<S> {
        &self.seen
    }

    /// Whatever the container holds right now.
    pub fn latest(&self) -> Arc<S> {
        self.rx.borrow().clone()
    }

    /// Wait for the container's next write. `None` once the owning feature
    /// handle is gone.
    pub async fn changed(&mut self) -> Option<Arc<S>> {
        self.rx.changed().await.ok()?;
        self.seen = self.rx.borrow_and_update().clone();
        Some(self.seen.clone())
    }

    pub fn into_stream(self) -> StateWatchStream<S> {
        StateWatchStream {
            inner: WatchStream::new(self.rx),
        }
    }
}

/// Snapshots as a `Stream`: the value held at conversion, then one per write.
pub struct StateWatchStream<S: Send + Sync + 'static> {
    inner: WatchStream<Arc<S>>,
}

impl<S: Send + Sync + 'static> Stream for StateWatchStream<S> {
    type Item = Arc<S>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
