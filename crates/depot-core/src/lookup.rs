// ── Typeahead lookup sessions ──
//
// One session backs one dropdown. Keystroke searches are debounced; every
// search bumps a generation counter and cancels the previous search's
// token, so an older request can neither finish its debounce nor land its
// response on top of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use depot_api::{DepotClient, LookupKind, LookupOption, LookupPage, LookupQuery};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::dedup::{append_options, dedup_options};
use crate::error::CoreError;
use crate::stream::StateStream;

/// Point-in-time view of a lookup session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupState {
    /// Keyword of the search these options belong to.
    pub keyword: Option<String>,
    pub options: Vec<LookupOption>,
    pub loading: bool,
    pub has_more: bool,
    pub error: Option<String>,
    /// Offset the next `fetch_more` will request.
    pub next_offset: u32,
    /// Generation of the search that produced this state.
    pub generation: u64,
}

/// What happened to a lookup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The response was applied; `options` is the new total.
    Applied { options: usize },
    /// A newer search replaced this one before it could apply.
    Superseded,
    /// `fetch_more` was called with nothing left to load.
    Exhausted,
}

/// Debounced, cancellable lookup against one `/lookups/{kind}` endpoint.
#[derive(Clone)]
pub struct LookupSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: Arc<DepotClient>,
    kind: LookupKind,
    limit: u32,
    debounce: Duration,
    generation: AtomicU64,
    cancel: Mutex<CancellationToken>,
    state: watch::Sender<Arc<LookupState>>,
}

impl LookupSession {
    pub fn new(client: Arc<DepotClient>, kind: LookupKind, limit: u32, debounce: Duration) -> Self {
        let (state, _) = watch::channel(Arc::new(LookupState::default()));
        Self {
            inner: Arc::new(SessionInner {
                client,
                kind,
                limit: if limit == 0 {
                    LookupQuery::DEFAULT_LIMIT
                } else {
                    limit
                },
                debounce,
                generation: AtomicU64::new(0),
                cancel: Mutex::new(CancellationToken::new()),
                state,
            }),
        }
    }

    pub fn kind(&self) -> LookupKind {
        self.inner.kind
    }

    pub fn snapshot(&self) -> Arc<LookupState> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream<LookupState> {
        StateStream::new(self.inner.state.subscribe())
    }

    /// Keystroke-driven search: waits out the debounce, then replaces the
    /// options with the first page for `keyword`.
    pub async fn search(&self, keyword: &str) -> Result<LookupOutcome, CoreError> {
        let keyword = Some(keyword.trim().to_owned()).filter(|k| !k.is_empty());
        self.replace(keyword, self.inner.debounce).await
    }

    /// Search without waiting out the debounce (search submitted).
    pub async fn search_now(&self, keyword: &str) -> Result<LookupOutcome, CoreError> {
        let keyword = Some(keyword.trim().to_owned()).filter(|k| !k.is_empty());
        self.replace(keyword, Duration::ZERO).await
    }

    /// Load the unfiltered first page immediately (dropdown opened).
    pub async fn load_initial(&self) -> Result<LookupOutcome, CoreError> {
        self.replace(None, Duration::ZERO).await
    }

    /// Append the next page of the current search.
    pub async fn fetch_more(&self) -> Result<LookupOutcome, CoreError> {
        let current = self.snapshot();
        if !current.has_more {
            return Ok(LookupOutcome::Exhausted);
        }

        let generation = self.inner.generation.load(Ordering::SeqCst);
        let token = self.current_token();
        let query = LookupQuery {
            keyword: current.keyword.clone(),
            limit: self.inner.limit,
            offset: current.next_offset,
        };
        self.mark_loading(current.keyword.clone(), false);

        let result = tokio::select! {
            () = token.cancelled() => return Ok(LookupOutcome::Superseded),
            res = self.inner.client.lookup(self.inner.kind, &query) => res,
        };
        self.apply(generation, &query, result)
    }

    /// Cancel whatever is in flight and forget all options.
    pub fn clear(&self) {
        let (generation, _) = self.next_generation();
        self.inner.state.send_modify(|s| {
            *s = Arc::new(LookupState {
                generation,
                ..LookupState::default()
            });
        });
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn replace(
        &self,
        keyword: Option<String>,
        debounce: Duration,
    ) -> Result<LookupOutcome, CoreError> {
        let (generation, token) = self.next_generation();
        self.mark_loading(keyword.clone(), true);

        if !debounce.is_zero() {
            tokio::select! {
                () = token.cancelled() => return Ok(LookupOutcome::Superseded),
                () = tokio::time::sleep(debounce) => {}
            }
        }

        let query = LookupQuery {
            keyword,
            limit: self.inner.limit,
            offset: 0,
        };
        let result = tokio::select! {
            () = token.cancelled() => return Ok(LookupOutcome::Superseded),
            res = self.inner.client.lookup(self.inner.kind, &query) => res,
        };
        self.apply(generation, &query, result)
    }

    /// Start a new generation, cancelling the previous one.
    fn next_generation(&self) -> (u64, CancellationToken) {
        let fresh = CancellationToken::new();
        let previous = {
            let mut slot = self
                .inner
                .cancel
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *slot, fresh.clone())
        };
        previous.cancel();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (generation, fresh)
    }

    fn current_token(&self) -> CancellationToken {
        self.inner
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn mark_loading(&self, keyword: Option<String>, replacing: bool) {
        self.inner.state.send_modify(|s| {
            let mut next = (**s).clone();
            next.loading = true;
            next.error = None;
            if replacing {
                next.keyword = keyword;
            }
            *s = Arc::new(next);
        });
    }

    /// Land a response, unless a newer generation has started since.
    fn apply(
        &self,
        generation: u64,
        query: &LookupQuery,
        result: Result<LookupPage, depot_api::Error>,
    ) -> Result<LookupOutcome, CoreError> {
        let latest = self.inner.generation.load(Ordering::SeqCst);
        if generation != latest {
            warn!(
                kind = %self.inner.kind,
                generation,
                latest,
                "discarding stale lookup response"
            );
            return Ok(LookupOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                let received = u32::try_from(page.options.len()).unwrap_or(u32::MAX);
                let mut total = 0;
                self.inner.state.send_modify(|s| {
                    let options = if query.offset == 0 {
                        dedup_options(page.options)
                    } else {
                        append_options(&s.options, page.options)
                    };
                    total = options.len();
                    *s = Arc::new(LookupState {
                        keyword: query.keyword.clone(),
                        options,
                        loading: false,
                        has_more: page.has_more,
                        error: None,
                        next_offset: query.offset.saturating_add(received),
                        generation,
                    });
                });
                debug!(kind = %self.inner.kind, generation, options = total, "lookup applied");
                Ok(LookupOutcome::Applied { options: total })
            }
            Err(err) => {
                let err = CoreError::from(err);
                let message = err.display_message(&format!("Failed to load {}", self.inner.kind));
                warn!(kind = %self.inner.kind, error = %message, "lookup failed");
                self.inner.state.send_modify(|s| {
                    let mut next = (**s).clone();
                    next.loading = false;
                    next.error = Some(message);
                    // A failed re-search must not leave the previous
                    // keyword's options paging under the new keyword.
                    if query.offset == 0 {
                        next.keyword.clone_from(&query.keyword);
                        next.options.clear();
                        next.has_more = false;
                        next.next_offset = 0;
                    }
                    *s = Arc::new(next);
                });
                Err(err)
            }
        }
    }
}
