//! Centralized default constants for the notehub crates.
//!
//! **This module is the single source of truth** for all shared default
//! values. The client and the cache orchestrator reference these constants
//! instead of defining their own magic numbers.

// =============================================================================
// REMOTE API
// =============================================================================

/// Base endpoint of the public NoteHub API.
pub const BASE_URL: &str = "https://notehub-public.goit.study/api";

/// Request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for note listings.
pub const PER_PAGE: u32 = 12;

/// First page number. The API is 1-based.
pub const FIRST_PAGE: u32 = 1;

// =============================================================================
// SEARCH
// =============================================================================

/// Debounce window for search input, in milliseconds. Edits within this
/// window are coalesced into a single list request.
pub const DEBOUNCE_MS: u64 = 500;

// =============================================================================
// FORM POLICY
// =============================================================================

/// Minimum title length accepted at creation time.
pub const TITLE_MIN_CHARS: usize = 3;

/// Maximum title length accepted at creation time.
pub const TITLE_MAX_CHARS: usize = 50;

/// Maximum content length accepted at creation time.
pub const CONTENT_MAX_CHARS: usize = 500;
