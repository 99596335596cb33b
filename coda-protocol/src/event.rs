//! Idle event emitted by the detector
//!
//! Produced once per debounce firing. Carries the content cached at the
//! previous firing ("previous") and the content captured when the timer was
//! last armed ("current"), plus the number of edits observed in between.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::document::DocumentMeta;

/// Notification that a tracked document's edits have paused
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdleEvent {
    /// The document that went quiet
    pub document: DocumentMeta,
    /// Content at the previous idle firing (or the initial snapshot)
    pub previous_content: String,
    /// Content at the time the debounce timer was last armed
    pub current_content: String,
    /// Number of edits observed since the previous firing
    pub change_count: u32,
    /// Unix timestamp when the event fired
    pub timestamp: u64,
}

impl IdleEvent {
    /// Create a new idle event stamped with the current time
    pub fn new(
        document: DocumentMeta,
        previous_content: String,
        current_content: String,
        change_count: u32,
    ) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            document,
            previous_content,
            current_content,
            change_count,
            timestamp,
        }
    }

    /// Whether any text was appended since the previous firing
    pub fn grew(&self) -> bool {
        self.current_content.len() > self.previous_content.len()
    }
}
