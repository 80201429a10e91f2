//! Wire-facing data model for the NoteHub notes API.
//!
//! The API has shipped two response-shape revisions for listings (one with
//! full pagination metadata, one without). `NotePage` parses the superset
//! and leaves missing fields as `None`, so callers never depend on which
//! revision answered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// Classification tag for a note. Closed enumeration: the API rejects
/// anything outside these five literals, so parsing rejects them too
/// before a request is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteTag {
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    /// All tag values, in form display order.
    pub const ALL: [NoteTag; 5] = [
        NoteTag::Todo,
        NoteTag::Work,
        NoteTag::Personal,
        NoteTag::Meeting,
        NoteTag::Shopping,
    ];
}

impl std::fmt::Display for NoteTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "Todo"),
            Self::Work => write!(f, "Work"),
            Self::Personal => write!(f, "Personal"),
            Self::Meeting => write!(f, "Meeting"),
            Self::Shopping => write!(f, "Shopping"),
        }
    }
}

impl std::str::FromStr for NoteTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Todo" => Ok(Self::Todo),
            "Work" => Ok(Self::Work),
            "Personal" => Ok(Self::Personal),
            "Meeting" => Ok(Self::Meeting),
            "Shopping" => Ok(Self::Shopping),
            _ => Err(Error::Validation(format!("Invalid note tag: {}", s))),
        }
    }
}

/// A note as returned by the remote API. The id is opaque and
/// server-assigned; notes are never mutated in place by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of a note listing, plus pagination metadata.
///
/// `total_pages` is present in every observed revision; `page`, `per_page`
/// and `total_items` only in the newer one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePage {
    pub notes: Vec<Note>,
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
}

/// Values collected by the note form, sent as the body of a create
/// request. `content` is omitted from the body when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    pub tag: NoteTag,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: NoteTag::Todo,
        }
    }
}

impl NoteDraft {
    /// Create a draft with the given title and tag and empty content.
    pub fn new(title: impl Into<String>, tag: NoteTag) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            tag,
        }
    }

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Check the draft against the form policy: title length in
    /// [3, 50] and required, content length at most 500. The server is the
    /// source of truth; this gate exists so out-of-contract input never
    /// reaches the network.
    pub fn validate(&self) -> Result<()> {
        let title_len = self.title.chars().count();
        if title_len < defaults::TITLE_MIN_CHARS {
            return Err(Error::Validation(format!(
                "Title must be at least {} characters",
                defaults::TITLE_MIN_CHARS
            )));
        }
        if title_len > defaults::TITLE_MAX_CHARS {
            return Err(Error::Validation(format!(
                "Title must be at most {} characters",
                defaults::TITLE_MAX_CHARS
            )));
        }
        if self.content.chars().count() > defaults::CONTENT_MAX_CHARS {
            return Err(Error::Validation(format!(
                "Content must be at most {} characters",
                defaults::CONTENT_MAX_CHARS
            )));
        }
        Ok(())
    }
}
