//! Per-key fetch state for the notes query cache.
//!
//! Each (page, search) combination owns one [`CacheEntry`], a small state
//! machine over {idle, loading, loaded, error}. Previously loaded data is
//! kept through a reload, so a revalidation never blanks the view
//! (stale-while-revalidate).

use notehub_core::NotePage;

/// Cache key: one page of one (debounced) search term.
///
/// The search term is stored post-trim, `None` for "no filter", so keys
/// built from `"rust"`, `"  rust "` and built-then-trimmed input all
/// collide as intended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub search: Option<String>,
}

impl QueryKey {
    /// Build a key, normalizing the search term.
    pub fn new(page: u32, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { page, search }
    }

    /// Same search, different page.
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page,
            search: self.search.clone(),
        }
    }
}

/// Lifecycle of one cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// No request issued yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded; `data` holds the result.
    Loaded,
    /// The last request failed.
    Error(String),
}

/// State machine for one query key.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub status: FetchStatus,
    /// Last successfully loaded page. Survives the transition back into
    /// `Loading`, and is only replaced by a newer successful load.
    pub data: Option<NotePage>,
    /// Invalidation mark: a refetch is needed before this entry is fresh.
    pub(crate) dirty: bool,
    /// Monotonic request counter; responses carrying a stale generation
    /// are discarded on arrival.
    pub(crate) generation: u64,
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            dirty: false,
            generation: 0,
        }
    }
}

impl CacheEntry {
    /// Transition into `Loading`, superseding any in-flight request.
    /// Returns the generation the new request must present on completion.
    pub(crate) fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        self.dirty = false;
        self.generation
    }

    /// Apply a completed request. Returns false (and changes nothing)
    /// when the generation is stale, i.e. the request was superseded
    /// while in flight.
    pub(crate) fn complete(
        &mut self,
        generation: u64,
        result: Result<NotePage, String>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(page) => {
                self.data = Some(page);
                self.status = FetchStatus::Loaded;
            }
            Err(reason) => {
                self.status = FetchStatus::Error(reason);
            }
        }
        true
    }

    /// True while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}

/// What the presentation layer should show for the active key. Exactly
/// one of these at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// A request is in flight and no data (not even stale) is available.
    Loading,
    /// The last request failed.
    Error(String),
    /// Loaded, and the page has no notes.
    Empty,
    /// Notes to render. May be stale data while a revalidation runs.
    Populated(NotePage),
}
