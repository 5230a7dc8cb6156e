// ── Paginated list container ──
//
// Holds the last fetched page of one entity type. Each fetch replaces the
// items and pagination wholesale; a failed fetch keeps them and records an
// error string instead. Snapshots are broadcast through a `watch` channel.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use depot_api::{ApiPage, GridPage, Page, PageMeta, to_grid_page};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::stream::StateStream;

/// Point-in-time view of a list container.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// Records from the last successful fetch.
    pub items: Arc<Vec<T>>,
    /// The server's pagination block from the last successful fetch.
    pub pagination: PageMeta,
    pub loading: bool,
    pub error: Option<String>,
    /// When the current `items` arrived; `None` before the first fetch.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<T> ListState<T> {
    fn initial(limit: u32) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            pagination: PageMeta::empty(limit),
            loading: false,
            error: None,
            fetched_at: None,
        }
    }

    /// Current page as a 0-based widget index.
    pub fn grid_page(&self) -> GridPage {
        ApiPage::new(self.pagination.page).map_or(GridPage(0), to_grid_page)
    }

    /// `true` after a successful fetch that returned nothing.
    pub fn is_empty(&self) -> bool {
        self.fetched_at.is_some() && self.items.is_empty()
    }
}

/// A reactive container for one paginated entity list.
pub struct ListContainer<T: Clone + Send + Sync + 'static> {
    /// Entity label used in logs and fallback error strings.
    label: &'static str,
    default_limit: u32,
    state: watch::Sender<Arc<ListState<T>>>,
}

impl<T: Clone + Send + Sync + 'static> ListContainer<T> {
    pub fn new(label: &'static str, default_limit: u32) -> Self {
        let (state, _) = watch::channel(Arc::new(ListState::initial(default_limit)));
        Self {
            label,
            default_limit,
            state,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<ListState<T>> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream<ListState<T>> {
        StateStream::new(self.state.subscribe())
    }

    /// Run one fetch through the container.
    ///
    /// Marks the container loading, awaits `fetch`, then either replaces
    /// items and pagination or records the error, leaving the previous
    /// items untouched. The typed error is returned as well so the caller
    /// can react to it.
    pub async fn run<F>(&self, fetch: F) -> Result<Arc<ListState<T>>, CoreError>
    where
        F: Future<Output = Result<Page<T>, depot_api::Error>>,
    {
        self.begin();
        match fetch.await {
            Ok(page) => {
                info!(
                    entity = self.label,
                    records = page.items.len(),
                    page = page.pagination.page,
                    total = page.pagination.total_records,
                    "fetch fulfilled"
                );
                self.fulfil(page);
                Ok(self.snapshot())
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Return to the never-fetched state.
    pub fn reset(&self) {
        let initial = Arc::new(ListState::initial(self.default_limit));
        self.state.send_modify(|s| *s = initial);
    }

    // ── Transitions ──────────────────────────────────────────────────

    fn begin(&self) {
        self.state.send_modify(|s| {
            let mut next = (**s).clone();
            next.loading = true;
            next.error = None;
            *s = Arc::new(next);
        });
    }

    fn fulfil(&self, page: Page<T>) {
        let next = Arc::new(ListState {
            items: Arc::new(page.items),
            pagination: page.pagination,
            loading: false,
            error: None,
            fetched_at: Some(Utc::now()),
        });
        self.state.send_modify(|s| *s = next);
    }

    /// Record a failure without touching items or pagination. Also used
    /// for preconditions checked before any request.
    pub(crate) fn fail(&self, err: &CoreError) {
        let message = err.display_message(&format!("Failed to fetch {}", self.label));
        warn!(entity = self.label, error = %message, "fetch rejected");
        self.state.send_modify(|s| {
            let mut next = (**s).clone();
            next.loading = false;
            next.error = Some(message);
            *s = Arc::new(next);
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn page(items: Vec<u32>, page: u32, total_pages: u32) -> Page<u32> {
        let total_records = items.len() as u64;
        Page {
            items,
            pagination: PageMeta {
                page,
                limit: 25,
                total_records,
                total_pages,
            },
        }
    }

    #[tokio::test]
    async fn success_replaces_items_and_pagination() {
        let list: ListContainer<u32> = ListContainer::new("numbers", 25);
        list.run(async { Ok(page(vec![1, 2, 3], 1, 2)) }).await.unwrap();

        let state = list.run(async { Ok(page(vec![4], 2, 2)) }).await.unwrap();
        assert_eq!(*state.items, vec![4]);
        assert_eq!(state.pagination.page, 2);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn failure_keeps_previous_items() {
        let list: ListContainer<u32> = ListContainer::new("numbers", 25);
        list.run(async { Ok(page(vec![1, 2], 1, 1)) }).await.unwrap();
        let before = list.snapshot();

        let result = list
            .run(async {
                Err(depot_api::Error::Api {
                    status: 500,
                    message: "database unavailable".into(),
                    code: None,
                    kind: None,
                })
            })
            .await;
        assert!(result.is_err());

        let after = list.snapshot();
        assert_eq!(after.items, before.items);
        assert_eq!(after.pagination, before.pagination);
        assert!(!after.loading);
        assert_eq!(after.error.as_deref(), Some("database unavailable"));
    }

    #[tokio::test]
    async fn fallback_message_names_the_entity() {
        let list: ListContainer<u32> = ListContainer::new("customers", 25);
        let _ = list
            .run(async {
                Err(depot_api::Error::Unsuccessful {
                    message: String::new(),
                })
            })
            .await;
        assert_eq!(
            list.snapshot().error.as_deref(),
            Some("Failed to fetch customers")
        );
    }

    #[tokio::test]
    async fn loading_is_visible_while_in_flight() {
        let list: ListContainer<u32> = ListContainer::new("numbers", 25);
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let mut stream = list.subscribe();

        let fetch = list.run(async move {
            rx.await.unwrap();
            Ok(page(vec![9], 1, 1))
        });
        let observe = async {
            let snap = stream.changed().await.unwrap();
            assert!(snap.loading);
            assert!(snap.error.is_none());
            tx.send(()).unwrap();
        };

        let (result, ()) = tokio::join!(fetch, observe);
        assert!(!result.unwrap().loading);
    }

    #[tokio::test]
    async fn error_is_cleared_when_next_fetch_starts() {
        let list: ListContainer<u32> = ListContainer::new("numbers", 25);
        let _ = list
            .run(async { Err(depot_api::Error::Timeout { timeout_secs: 1 }) })
            .await;
        assert!(list.snapshot().error.is_some());

        list.run(async { Ok(page(Vec::new(), 1, 0)) }).await.unwrap();
        let state = list.snapshot();
        assert!(state.error.is_none());
        assert!(state.is_empty());
        assert_eq!(state.pagination.page_count(), 1);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let list: ListContainer<u32> = ListContainer::new("numbers", 50);
        list.fulfil(page(vec![1], 3, 4));
        assert_eq!(list.snapshot().grid_page(), GridPage(2));

        list.reset();
        let state = list.snapshot();
        assert!(state.items.is_empty());
        assert_eq!(state.pagination, PageMeta::empty(50));
        assert!(state.fetched_at.is_none());
        assert!(!state.is_empty());
    }
}
