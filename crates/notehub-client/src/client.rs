//! HTTP implementation of the notes API against the NoteHub endpoint.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use notehub_core::{Error, Note, NoteDraft, NoteHubConfig, NotePage, Result};

use crate::api::{ListNotesRequest, NotesApi};

/// Threshold above which a completed call is logged as slow (ms).
const SLOW_REQUEST_MS: u64 = 5000;

/// Authenticated client for the NoteHub API.
///
/// Stateless: every method issues exactly one HTTP call, with no retry and
/// no caching. Errors propagate to the caller untouched.
#[derive(Debug)]
pub struct NoteHubClient {
    client: Client,
    config: NoteHubConfig,
}

impl NoteHubClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails fast with [`Error::Config`] when the token is empty: the
    /// system refuses to start rather than issue unauthenticated requests
    /// the remote API would reject anyway.
    pub fn new(config: NoteHubConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(Error::Config(
                "NoteHub bearer token is empty; refusing to construct client".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing NoteHub client: url={}, timeout={}s",
            config.base_url, config.timeout_seconds
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables (see [`NoteHubConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(NoteHubConfig::from_env()?)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &NoteHubConfig {
        &self.config
    }

    /// Build a request with the bearer authorization header.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.config.token))
    }

    /// Turn a non-success response into a request error carrying the
    /// status and body.
    async fn error_for_status(response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Error::request(
            Some(status.as_u16()),
            format!("NoteHub returned {}: {}", status, body),
        )
    }
}

/// Delete responses come in two revisions: the note directly, or wrapped
/// in a `{ "note": ... }` envelope. Parse whichever arrived and normalize.
#[derive(Deserialize)]
#[serde(untagged)]
enum DeleteNoteResponse {
    Enveloped { note: Note },
    Direct(Note),
}

impl DeleteNoteResponse {
    fn into_note(self) -> Note {
        match self {
            Self::Enveloped { note } => note,
            Self::Direct(note) => note,
        }
    }
}

#[async_trait]
impl NotesApi for NoteHubClient {
    #[instrument(skip(self, req), fields(subsystem = "client", component = "notehub", op = "list_notes", page = req.page, per_page = req.per_page))]
    async fn list_notes(&self, req: ListNotesRequest) -> Result<NotePage> {
        if req.page == 0 || req.per_page == 0 {
            return Err(Error::Validation(
                "page and perPage must be positive".to_string(),
            ));
        }

        let start = Instant::now();

        let mut request = self.request(Method::GET, "/notes").query(&[
            ("page", req.page.to_string()),
            ("perPage", req.per_page.to_string()),
        ]);

        // Blank search means "no filter": omit the parameter entirely
        // rather than sending an empty string.
        let search = req
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(term) = search {
            request = request.query(&[("search", term)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let page: NotePage = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse list response: {}", e)))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            result_count = page.notes.len(),
            total_pages = page.total_pages,
            query = search.unwrap_or(""),
            duration_ms = elapsed,
            "List complete"
        );
        if elapsed > SLOW_REQUEST_MS {
            warn!(duration_ms = elapsed, slow = true, "Slow list request");
        }

        Ok(page)
    }

    #[instrument(skip(self, draft), fields(subsystem = "client", component = "notehub", op = "create_note", tag = %draft.tag))]
    async fn create_note(&self, draft: NoteDraft) -> Result<Note> {
        // Pre-flight gate: out-of-contract drafts never reach the network.
        draft.validate()?;

        let start = Instant::now();

        let response = self
            .request(Method::POST, "/notes")
            .json(&draft)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let note: Note = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse create response: {}", e)))?;

        debug!(
            note_id = %note.id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Create complete"
        );

        Ok(note)
    }

    #[instrument(skip(self), fields(subsystem = "client", component = "notehub", op = "delete_note", note_id = %id))]
    async fn delete_note(&self, id: &str) -> Result<Note> {
        if id.trim().is_empty() {
            return Err(Error::Validation("note id must not be empty".to_string()));
        }

        let start = Instant::now();

        let response = self
            .request(Method::DELETE, &format!("/notes/{}", id))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let deleted: DeleteNoteResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Failed to parse delete response: {}", e)))?;
        let note = deleted.into_note();

        debug!(
            note_id = %note.id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Delete complete"
        );

        Ok(note)
    }
}
