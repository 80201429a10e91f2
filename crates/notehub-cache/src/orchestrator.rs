//! The notes query/mutation orchestrator.
//!
//! Holds the per-key cache and drives it: list requests go out through
//! the [`NotesApi`] seam, search edits are coalesced over a debounce
//! window before they touch the active key, and successful mutations
//! invalidate the whole notes namespace so the next view reflects them.
//!
//! Concurrency model: all shared state sits behind one async mutex that
//! is never held across a network await. Overlapping fetches for
//! different keys land in different entries; a superseded fetch for the
//! same key is discarded by generation check on arrival.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use notehub_client::{ListNotesRequest, NotesApi};
use notehub_core::{defaults, Note, NoteDraft, Result};

use crate::state::{CacheEntry, FetchStatus, QueryKey, ViewState};

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Debounce window for search input, in milliseconds.
    pub debounce_ms: u64,
    /// Page size for list requests.
    pub per_page: u32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: defaults::DEBOUNCE_MS,
            per_page: defaults::PER_PAGE,
        }
    }
}

impl OrchestratorConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `NOTEHUB_DEBOUNCE_MS` | `500` | Search debounce window |
    /// | `NOTEHUB_PER_PAGE` | `12` | Page size for listings |
    pub fn from_env() -> Self {
        let debounce_ms = std::env::var("NOTEHUB_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::DEBOUNCE_MS);

        let per_page = std::env::var("NOTEHUB_PER_PAGE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults::PER_PAGE)
            .max(1);

        Self {
            debounce_ms,
            per_page,
        }
    }

    /// Set the debounce window.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }
}

struct Inner {
    cache: HashMap<QueryKey, CacheEntry>,
    active: QueryKey,
    /// Last page shown for any key; presented while the active key loads
    /// and has no data of its own yet (stale-while-revalidate).
    fallback: Option<notehub_core::NotePage>,
    /// Bumped on every search edit; a debounce timer only fires if its
    /// epoch is still current when it wakes.
    search_epoch: u64,
}

/// Orchestrates list queries and mutations over a [`NotesApi`].
pub struct NotesOrchestrator<A> {
    api: Arc<A>,
    config: OrchestratorConfig,
    inner: Arc<Mutex<Inner>>,
}

impl<A> Clone for NotesOrchestrator<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            config: self.config.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<A: NotesApi + 'static> NotesOrchestrator<A> {
    /// Create an orchestrator over the given API, starting at page 1 with
    /// no search filter.
    pub fn new(api: A, config: OrchestratorConfig) -> Self {
        Self {
            api: Arc::new(api),
            config,
            inner: Arc::new(Mutex::new(Inner {
                cache: HashMap::new(),
                active: QueryKey::new(defaults::FIRST_PAGE, None),
                fallback: None,
                search_epoch: 0,
            })),
        }
    }

    /// The currently active (page, search) key.
    pub async fn active_key(&self) -> QueryKey {
        self.inner.lock().await.active.clone()
    }

    /// Snapshot of one cache entry, if present.
    pub async fn entry(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.inner.lock().await.cache.get(key).cloned()
    }

    /// What the presentation layer should render right now. Exactly one
    /// of {error, loading, empty, populated}.
    pub async fn view(&self) -> ViewState {
        let inner = self.inner.lock().await;
        let entry = inner.cache.get(&inner.active);
        match entry {
            Some(entry) => {
                if let FetchStatus::Error(reason) = &entry.status {
                    return ViewState::Error(reason.clone());
                }
                match &entry.data {
                    Some(page) if page.notes.is_empty() => ViewState::Empty,
                    Some(page) => ViewState::Populated(page.clone()),
                    None => match &inner.fallback {
                        Some(stale) => ViewState::Populated(stale.clone()),
                        None => ViewState::Loading,
                    },
                }
            }
            None => match &inner.fallback {
                Some(stale) => ViewState::Populated(stale.clone()),
                None => ViewState::Loading,
            },
        }
    }

    /// Switch to another page of the current search, fetching it unless a
    /// fresh cached copy exists.
    pub async fn set_page(&self, page: u32) {
        let key = {
            let mut inner = self.inner.lock().await;
            inner.active = inner.active.at_page(page);
            inner.active.clone()
        };
        self.fetch_key(key, false).await;
    }

    /// Record a search edit. The actual key switch and fetch happen after
    /// the debounce window, and only if no newer edit arrived meanwhile.
    /// Changing the search resets the page to 1.
    pub async fn set_search(&self, text: &str) {
        let epoch = {
            let mut inner = self.inner.lock().await;
            inner.search_epoch += 1;
            inner.search_epoch
        };

        let this = self.clone();
        let text = text.to_string();
        let window = self.config.debounce_ms;
        tokio::spawn(async move {
            sleep(Duration::from_millis(window)).await;

            let key = {
                let mut inner = this.inner.lock().await;
                if inner.search_epoch != epoch {
                    debug!(
                        subsystem = "cache",
                        op = "set_search",
                        "Debounce timer superseded, discarding"
                    );
                    return;
                }
                inner.active = QueryKey::new(defaults::FIRST_PAGE, Some(&text));
                inner.active.clone()
            };
            debug!(
                subsystem = "cache",
                op = "set_search",
                query = %key.search.as_deref().unwrap_or(""),
                "Debounced search settled"
            );
            this.fetch_key(key, false).await;
        });
    }

    /// Fetch the active key now, bypassing the cache-hit check.
    pub async fn refresh(&self) {
        let key = self.active_key().await;
        self.fetch_key(key, true).await;
    }

    /// Create a note, then invalidate the notes namespace on success.
    pub async fn create(&self, draft: NoteDraft) -> Result<Note> {
        let note = self.api.create_note(draft).await?;
        info!(
            subsystem = "cache",
            op = "create",
            note_id = %note.id,
            "Note created, invalidating cache"
        );
        self.invalidate_all().await;
        Ok(note)
    }

    /// Delete a note, then invalidate the notes namespace on success.
    pub async fn delete(&self, id: &str) -> Result<Note> {
        let note = self.api.delete_note(id).await?;
        info!(
            subsystem = "cache",
            op = "delete",
            note_id = %note.id,
            "Note deleted, invalidating cache"
        );
        self.invalidate_all().await;
        Ok(note)
    }

    /// Mark every cached entry as needing a refetch and schedule one for
    /// the active key. Entries with a request in flight are marked too:
    /// that response may have been snapshotted before the mutation, so
    /// the fetch loop issues one follow-up once it lands. Idempotent: the
    /// mark is a flag, not a counter, so repeated invalidation cannot
    /// trigger a refetch storm.
    pub async fn invalidate_all(&self) {
        let key = {
            let mut inner = self.inner.lock().await;
            for entry in inner.cache.values_mut() {
                entry.dirty = true;
            }
            debug!(
                subsystem = "cache",
                op = "invalidate_all",
                marked = inner.cache.len(),
                "Cache invalidated"
            );
            inner.active.clone()
        };

        let this = self.clone();
        tokio::spawn(async move {
            this.fetch_key(key, false).await;
        });
    }

    /// Fetch one key through the API, updating its entry. The lock is
    /// released for the duration of the network call; arrival is gated on
    /// the generation taken at departure. If an invalidation marked the
    /// entry dirty while the request was in flight, its response predates
    /// the mutation, so the loop issues one follow-up fetch.
    async fn fetch_key(&self, key: QueryKey, mut force: bool) {
        loop {
            let generation = {
                let mut inner = self.inner.lock().await;
                let entry = inner.cache.entry(key.clone()).or_default();
                if entry.is_loading() {
                    debug!(
                        subsystem = "cache",
                        op = "fetch",
                        page = key.page,
                        "Request already in flight, deduplicating"
                    );
                    return;
                }
                if !force && entry.status == FetchStatus::Loaded && !entry.dirty {
                    debug!(
                        subsystem = "cache",
                        op = "fetch",
                        page = key.page,
                        "Cache hit, serving without request"
                    );
                    return;
                }
                entry.begin_load()
            };

            let request = ListNotesRequest {
                page: key.page,
                per_page: self.config.per_page,
                search: key.search.clone(),
            };
            let result = self.api.list_notes(request).await;

            let mut inner = self.inner.lock().await;
            let is_active = inner.active == key;
            let entry = inner.cache.entry(key.clone()).or_default();
            let outcome = match result {
                Ok(page) => Ok(page),
                Err(e) => {
                    warn!(
                        subsystem = "cache",
                        op = "fetch",
                        page = key.page,
                        error = %e,
                        "List request failed"
                    );
                    Err(e.to_string())
                }
            };
            if !entry.complete(generation, outcome) {
                debug!(
                    subsystem = "cache",
                    op = "fetch",
                    page = key.page,
                    "Superseded response discarded"
                );
                return;
            }
            let invalidated = entry.dirty;
            let data = entry.data.clone();
            // An empty page makes a useless fallback: showing it for a key
            // that is still loading would masquerade as a real empty result.
            if is_active {
                if let Some(page) = data.filter(|p| !p.notes.is_empty()) {
                    inner.fallback = Some(page);
                }
            }
            if !invalidated {
                return;
            }
            drop(inner);
            debug!(
                subsystem = "cache",
                op = "fetch",
                page = key.page,
                "Invalidated while in flight, refetching"
            );
            force = false;
        }
    }
}
