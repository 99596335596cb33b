//! Document identity and metadata
//!
//! Documents are identified by a stable, host-supplied identity string
//! (typically the document URI). The engine never interprets the identity
//! beyond equality and hashing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity for a watched document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id from a host-supplied identity string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Metadata used to decide whether a document is tracked
///
/// All fields come from the host. The matcher predicate sees exactly this
/// struct and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Stable document identity
    pub id: DocumentId,
    /// Language identifier as reported by the host (e.g. "markdown")
    pub language_id: String,
    /// URI scheme of the document (e.g. "file", "untitled")
    pub uri_scheme: String,
    /// Human-readable title (file name or tab label)
    pub title: String,
}

impl DocumentMeta {
    pub fn new(
        id: impl Into<DocumentId>,
        language_id: impl Into<String>,
        uri_scheme: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            language_id: language_id.into(),
            uri_scheme: uri_scheme.into(),
            title: title.into(),
        }
    }
}

/// One observed state of a document, delivered with every change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Document metadata
    pub meta: DocumentMeta,
    /// Host-reported document version at the time of the edit
    pub version: i64,
    /// Full document content at the time of the edit
    pub content: String,
}

impl DocumentSnapshot {
    pub fn new(meta: DocumentMeta, version: i64, content: impl Into<String>) -> Self {
        Self {
            meta,
            version,
            content: content.into(),
        }
    }
}
