//! # notehub-client
//!
//! The access client for the remote NoteHub API: a stateless translator
//! from three intents (list/search/paginate, create, delete) into
//! authenticated HTTP calls and typed results.
//!
//! Caching, request de-duplication, and refetch-after-mutation live in
//! `notehub-cache`, not here. Keeping HTTP translation free of that logic
//! means this crate can be tested in isolation by mocking the transport.

pub mod api;
pub mod client;

#[cfg(feature = "mock")]
pub mod mock;

pub use api::{ListNotesRequest, NotesApi};
pub use client::NoteHubClient;
