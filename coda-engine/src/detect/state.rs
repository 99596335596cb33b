//! Per-document tracking state

use tokio_util::sync::CancellationToken;

use coda_protocol::DocumentMeta;

/// Bookkeeping for one tracked document
///
/// At most one timer is armed per document; `cancel` belongs to the
/// currently armed timer and `generation` guards against a cancelled
/// timer firing after a newer one was armed.
pub(crate) struct DocumentState {
    pub meta: DocumentMeta,
    /// Content as of the last fired idle event; before the first fire,
    /// the snapshot that started tracking
    pub last_content: String,
    /// Content captured when the current timer was (re)armed
    pub armed_content: String,
    /// Version captured when the current timer was (re)armed
    pub armed_version: i64,
    /// Edits observed since the last fired event
    pub change_count: u32,
    /// Cancels the currently armed timer
    pub cancel: CancellationToken,
    /// Bumped on every rearm; a firing timer must match to emit
    pub generation: u64,
}

impl DocumentState {
    pub fn new(meta: DocumentMeta, content: String, version: i64) -> Self {
        Self {
            meta,
            last_content: content.clone(),
            armed_content: content,
            armed_version: version,
            change_count: 1,
            cancel: CancellationToken::new(),
            generation: 0,
        }
    }

    /// Cancel the armed timer and capture the newer snapshot
    pub fn rearm(&mut self, content: String, version: i64) -> u64 {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.generation += 1;
        self.armed_content = content;
        self.armed_version = version;
        self.change_count += 1;
        self.generation
    }
}
