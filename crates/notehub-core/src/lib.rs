//! # notehub-core
//!
//! Core types, error taxonomy, and configuration for the NoteHub client
//! library.
//!
//! This crate provides the foundational data structures that the other
//! notehub crates depend on: the note data model, the shared error type,
//! and the client configuration read once at process start.

pub mod config;
pub mod defaults;
pub mod error;
pub mod models;

// Re-export commonly used types at crate root
pub use config::NoteHubConfig;
pub use error::{Error, Result};
pub use models::{Note, NoteDraft, NotePage, NoteTag};
