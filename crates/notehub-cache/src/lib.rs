//! # notehub-cache
//!
//! Query and mutation orchestrator for the NoteHub client: a per-key
//! cache of note listings with debounced search, stale-while-revalidate
//! presentation, and invalidation-triggered refetch after mutations.
//!
//! The HTTP client underneath (`notehub-client`) stays a stateless
//! translator; everything stateful lives here, behind the [`NotesApi`]
//! trait so tests can drive the orchestrator with a mock transport.
//!
//! [`NotesApi`]: notehub_client::NotesApi

pub mod orchestrator;
pub mod state;

pub use orchestrator::{NotesOrchestrator, OrchestratorConfig};
pub use state::{CacheEntry, FetchStatus, QueryKey, ViewState};
