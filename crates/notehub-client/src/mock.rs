//! Mock notes API for deterministic testing.
//!
//! In-memory implementation of [`NotesApi`] with configurable latency and
//! failure injection, plus a call log so tests can assert which operations
//! were (or were not) issued.
//!
//! ## Usage
//!
//! ```rust
//! use notehub_client::mock::MockNotesApi;
//! use notehub_client::{ListNotesRequest, NotesApi};
//! use notehub_core::NoteTag;
//!
//! # async fn example() {
//! let api = MockNotesApi::new().with_note("Standup", "9am", NoteTag::Meeting);
//! let page = api.list_notes(ListNotesRequest::default()).await.unwrap();
//! assert_eq!(page.notes.len(), 1);
//! # }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::{sleep, Duration};

use notehub_core::{Error, Note, NoteDraft, NotePage, NoteTag, Result};

use crate::api::{ListNotesRequest, NotesApi};

/// One recorded API call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub detail: String,
}

#[derive(Debug, Default)]
struct MockState {
    notes: Vec<Note>,
    next_id: u64,
    latency_ms: u64,
    failure: Option<(Option<u16>, String)>,
    calls: Vec<MockCall>,
}

/// Mock notes API backed by an in-memory store.
///
/// Cloning shares the underlying store, so a test can hold one handle
/// while the orchestrator under test holds another.
#[derive(Clone, Default)]
pub struct MockNotesApi {
    state: Arc<Mutex<MockState>>,
}

impl MockNotesApi {
    /// Create an empty mock API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a note. Ids are assigned as `note-1`, `note-2`, ...
    pub fn with_note(
        self,
        title: impl Into<String>,
        content: impl Into<String>,
        tag: NoteTag,
    ) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = format!("note-{}", state.next_id + 1);
            state.next_id += 1;
            state.notes.push(Note {
                id,
                title: title.into(),
                content: content.into(),
                tag,
                created_at: None,
                updated_at: None,
            });
        }
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(self, latency_ms: u64) -> Self {
        self.state.lock().unwrap().latency_ms = latency_ms;
        self
    }

    /// Change the simulated latency on a live handle.
    pub fn set_latency_ms(&self, latency_ms: u64) {
        self.state.lock().unwrap().latency_ms = latency_ms;
    }

    /// Make every subsequent call fail with the given status and message.
    pub fn with_failure(self, status: Option<u16>, message: impl Into<String>) -> Self {
        self.set_failure(status, message);
        self
    }

    /// Arm failure injection on a live handle.
    pub fn set_failure(&self, status: Option<u16>, message: impl Into<String>) {
        self.state.lock().unwrap().failure = Some((status, message.into()));
    }

    /// Disarm failure injection.
    pub fn clear_failure(&self) {
        self.state.lock().unwrap().failure = None;
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of recorded calls for one operation.
    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Snapshot of the stored notes.
    pub fn notes(&self) -> Vec<Note> {
        self.state.lock().unwrap().notes.clone()
    }

    /// Record the call, then return either the armed failure or the
    /// configured latency to simulate.
    fn begin_call(&self, operation: &str, detail: String) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall {
            operation: operation.to_string(),
            detail,
        });
        if let Some((status, message)) = &state.failure {
            return Err(Error::request(*status, message.clone()));
        }
        Ok(state.latency_ms)
    }
}

#[async_trait]
impl NotesApi for MockNotesApi {
    async fn list_notes(&self, req: ListNotesRequest) -> Result<NotePage> {
        let detail = format!(
            "page={} per_page={} search={:?}",
            req.page, req.per_page, req.search
        );
        let latency = self.begin_call("list_notes", detail)?;
        if latency > 0 {
            sleep(Duration::from_millis(latency)).await;
        }

        let state = self.state.lock().unwrap();
        let needle = req
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let filtered: Vec<Note> = state
            .notes
            .iter()
            .filter(|n| match &needle {
                Some(term) => {
                    n.title.to_lowercase().contains(term)
                        || n.content.to_lowercase().contains(term)
                }
                None => true,
            })
            .cloned()
            .collect();

        let total_items = filtered.len() as u64;
        let per_page = req.per_page.max(1) as usize;
        let total_pages = filtered.len().div_ceil(per_page) as u32;
        let start = (req.page.max(1) as usize - 1) * per_page;
        let notes: Vec<Note> = filtered.into_iter().skip(start).take(per_page).collect();

        Ok(NotePage {
            total_items: Some(total_items),
            notes,
            total_pages,
            page: Some(req.page),
            per_page: Some(req.per_page),
        })
    }

    async fn create_note(&self, draft: NoteDraft) -> Result<Note> {
        // Same pre-flight gate as the HTTP client: invalid drafts are
        // rejected before the call is recorded.
        draft.validate()?;
        let latency = self.begin_call("create_note", format!("title={}", draft.title))?;
        if latency > 0 {
            sleep(Duration::from_millis(latency)).await;
        }

        let mut state = self.state.lock().unwrap();
        let id = format!("note-{}", state.next_id + 1);
        state.next_id += 1;
        let note = Note {
            id,
            title: draft.title,
            content: draft.content,
            tag: draft.tag,
            created_at: None,
            updated_at: None,
        };
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<Note> {
        let latency = self.begin_call("delete_note", format!("id={}", id))?;
        if latency > 0 {
            sleep(Duration::from_millis(latency)).await;
        }

        let mut state = self.state.lock().unwrap();
        let position = state.notes.iter().position(|n| n.id == id);
        match position {
            Some(index) => Ok(state.notes.remove(index)),
            None => Err(Error::request(
                Some(404),
                format!("Note not found: {}", id),
            )),
        }
    }
}
