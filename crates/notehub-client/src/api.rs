//! The notes API trait: the seam between the HTTP client and its
//! consumers, enabling pluggable transports and testability.

use async_trait::async_trait;

use notehub_core::{defaults, Note, NoteDraft, NotePage, Result};

/// Request for listing notes. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNotesRequest {
    /// Page number (1-based).
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Optional search term. Trimmed before sending; an empty-after-trim
    /// value is treated as "no filter" and omitted from the request.
    pub search: Option<String>,
}

impl Default for ListNotesRequest {
    fn default() -> Self {
        Self {
            page: defaults::FIRST_PAGE,
            per_page: defaults::PER_PAGE,
            search: None,
        }
    }
}

impl ListNotesRequest {
    /// Select a page, keeping the default page size and no filter.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Set the page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// The three operations of the notes API.
///
/// Implemented over HTTP by [`crate::NoteHubClient`] and in memory by the
/// mock (feature `mock`).
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Fetch one page of notes, optionally filtered by a search term.
    async fn list_notes(&self, req: ListNotesRequest) -> Result<NotePage>;

    /// Create a note from form values. Returns the created note with its
    /// server-assigned id.
    async fn create_note(&self, draft: NoteDraft) -> Result<Note>;

    /// Delete a note by id. Returns the deleted note.
    async fn delete_note(&self, id: &str) -> Result<Note>;
}
