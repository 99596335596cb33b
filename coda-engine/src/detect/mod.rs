//! Debounced idle detection
//!
//! Tracks matched documents and fires an [`IdleEvent`] once a document has
//! seen no edits for the configured quiet period. Every edit cancels the
//! previous timer and arms a fresh one, so a continuously streaming reply
//! produces exactly one event, after the stream stops.
//!
//! Timer tasks are plain `tokio::spawn` futures racing a sleep against a
//! cancellation token. A generation counter per document guards against a
//! stale timer firing between cancellation and its task observing it.

mod state;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use coda_protocol::{DocumentId, DocumentSnapshot, IdleEvent};

use crate::config::ConfigHandle;
use crate::matcher::DocumentMatcher;
use state::DocumentState;

/// Receiver side of the detector's event stream
pub type IdleEventReceiver = mpsc::UnboundedReceiver<IdleEvent>;

/// Debounced per-document idle detector
///
/// Cheap to clone; all clones share the same tracking table and event
/// stream. Callable from synchronous code, but must be used inside a tokio
/// runtime because edits spawn timer tasks.
#[derive(Clone)]
pub struct IdleDetector {
    inner: Arc<Inner>,
}

struct Inner {
    docs: Mutex<HashMap<DocumentId, DocumentState>>,
    config: ConfigHandle,
    matcher: Box<dyn DocumentMatcher>,
    events: mpsc::UnboundedSender<IdleEvent>,
}

impl IdleDetector {
    /// Create a detector and the receiving end of its event stream
    pub fn new(
        config: ConfigHandle,
        matcher: Box<dyn DocumentMatcher>,
    ) -> (Self, IdleEventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let detector = Self {
            inner: Arc::new(Inner {
                docs: Mutex::new(HashMap::new()),
                config,
                matcher,
                events: tx,
            }),
        };
        (detector, rx)
    }

    /// Handle one edit notification for a document
    ///
    /// Non-matching documents are ignored. A matcher error is logged and
    /// treated as non-match, so a bad predicate never takes detection down.
    pub fn handle_edit(&self, snapshot: DocumentSnapshot) {
        let config = self.inner.config.load();
        if !config.detector.enabled {
            return;
        }

        let matches = match self.inner.matcher.matches(&snapshot.meta) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(
                    document = %snapshot.meta.id,
                    error = %e,
                    "Matcher failed, ignoring edit"
                );
                false
            }
        };
        if !matches {
            return;
        }

        let quiet = config.detector.quiet_period();
        let DocumentSnapshot {
            meta,
            version,
            content,
        } = snapshot;
        let id = meta.id.clone();

        let (token, generation) = {
            let mut docs = self.inner.docs.lock();
            match docs.entry(id.clone()) {
                Entry::Vacant(entry) => {
                    debug!(document = %id, "Tracking new document");
                    let state = entry.insert(DocumentState::new(meta, content, version));
                    (state.cancel.clone(), state.generation)
                }
                Entry::Occupied(entry) => {
                    let state = entry.into_mut();
                    let generation = state.rearm(content, version);
                    (state.cancel.clone(), generation)
                }
            }
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(quiet) => {
                    inner.fire(&id, generation);
                }
                _ = token.cancelled() => {}
            }
        });
    }

    /// Stop tracking a closed document and cancel any armed timer
    pub fn handle_close(&self, id: &DocumentId) {
        let mut docs = self.inner.docs.lock();
        if let Some(state) = docs.remove(id) {
            state.cancel.cancel();
            debug!(document = %id, "Stopped tracking closed document");
        }
    }

    /// React to the enabled flag changing at runtime
    ///
    /// Disabling cancels all armed timers and drops all tracking state;
    /// nothing fires from edits observed before the flip.
    pub fn set_enabled(&self, enabled: bool) {
        if enabled {
            info!("Idle detection enabled");
            return;
        }

        let mut docs = self.inner.docs.lock();
        for state in docs.values() {
            state.cancel.cancel();
        }
        let dropped = docs.len();
        docs.clear();
        info!(dropped, "Idle detection disabled, tracking state cleared");
    }

    /// Number of currently tracked documents
    pub fn tracked_count(&self) -> usize {
        self.inner.docs.lock().len()
    }

    /// Whether a document is currently tracked
    pub fn is_tracking(&self, id: &DocumentId) -> bool {
        self.inner.docs.lock().contains_key(id)
    }
}

impl Inner {
    /// Emit the idle event for a timer that ran to completion
    fn fire(&self, id: &DocumentId, generation: u64) {
        let (event, version) = {
            let mut docs = self.docs.lock();
            let Some(state) = docs.get_mut(id) else {
                return;
            };
            // A newer timer was armed after this one was cancelled
            if state.generation != generation {
                return;
            }

            let event = IdleEvent::new(
                state.meta.clone(),
                state.last_content.clone(),
                state.armed_content.clone(),
                state.change_count,
            );
            state.last_content = state.armed_content.clone();
            state.change_count = 0;
            (event, state.armed_version)
        };

        if self.config.load().detector.log_firings {
            info!(
                document = %id,
                version,
                changes = event.change_count,
                "Document went idle"
            );
        }

        if self.events.send(event).is_err() {
            debug!(document = %id, "Idle event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{config_handle_from, AppConfig};
    use coda_protocol::DocumentMeta;
    use std::time::Duration;

    const QUIET_MS: u64 = 200;

    fn test_config(enabled: bool) -> ConfigHandle {
        let mut config = AppConfig::default();
        config.detector.enabled = enabled;
        config.detector.quiet_ms = QUIET_MS;
        config.detector.log_firings = false;
        config_handle_from(config)
    }

    fn detector(enabled: bool) -> (IdleDetector, IdleEventReceiver) {
        IdleDetector::new(test_config(enabled), Box::new(|_: &DocumentMeta| Ok(true)))
    }

    fn snapshot(id: &str, version: i64, content: &str) -> DocumentSnapshot {
        let meta = DocumentMeta::new(id, "markdown", "untitled", "Chat");
        DocumentSnapshot::new(meta, version, content)
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    // ==================== Debounce Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let (detector, mut rx) = detector(true);

        detector.handle_edit(snapshot("doc-1", 1, "hello"));
        let event = rx.recv().await.unwrap();

        assert_eq!(event.document.id.as_str(), "doc-1");
        assert_eq!(event.previous_content, "hello");
        assert_eq!(event.current_content, "hello");
        assert_eq!(event.change_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_firing_previous_is_tracking_start_snapshot() {
        let (detector, mut rx) = detector(true);

        // Tracking starts at "intro"; the reply streams in afterwards
        detector.handle_edit(snapshot("doc-1", 1, "intro"));
        sleep_ms(QUIET_MS / 2).await;
        detector.handle_edit(snapshot("doc-1", 2, "intro\n```bash\nls\n```"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.previous_content, "intro");
        assert_eq!(event.current_content, "intro\n```bash\nls\n```");
        assert!(event.grew());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_within_quiet_period_coalesce() {
        let (detector, mut rx) = detector(true);

        detector.handle_edit(snapshot("doc-1", 1, "a"));
        sleep_ms(QUIET_MS / 2).await;
        detector.handle_edit(snapshot("doc-1", 2, "ab"));
        sleep_ms(QUIET_MS / 2).await;
        detector.handle_edit(snapshot("doc-1", 3, "abc"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.change_count, 3);
        assert_eq!(event.current_content, "abc");

        // Exactly one event for the whole burst
        sleep_ms(QUIET_MS * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_content_carries_across_firings() {
        let (detector, mut rx) = detector(true);

        detector.handle_edit(snapshot("doc-1", 1, "first"));
        let first = rx.recv().await.unwrap();
        assert_eq!(first.previous_content, "first");
        assert_eq!(first.current_content, "first");

        detector.handle_edit(snapshot("doc-1", 2, "first second"));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.previous_content, "first");
        assert_eq!(second.current_content, "first second");
        assert_eq!(second.change_count, 1);
        assert!(second.grew());
    }

    #[tokio::test(start_paused = true)]
    async fn test_documents_debounce_independently() {
        let (detector, mut rx) = detector(true);

        detector.handle_edit(snapshot("doc-1", 1, "one"));
        sleep_ms(QUIET_MS / 2).await;
        detector.handle_edit(snapshot("doc-2", 1, "two"));

        // doc-1 armed earlier, so it fires first
        let first = rx.recv().await.unwrap();
        assert_eq!(first.document.id.as_str(), "doc-1");

        let second = rx.recv().await.unwrap();
        assert_eq!(second.document.id.as_str(), "doc-2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_to_one_document_does_not_reset_another() {
        let (detector, mut rx) = detector(true);

        detector.handle_edit(snapshot("doc-1", 1, "one"));
        sleep_ms(QUIET_MS / 2).await;
        // Burst on doc-2 must not delay doc-1
        detector.handle_edit(snapshot("doc-2", 1, "two"));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.document.id.as_str(), "doc-1");
        assert_eq!(first.change_count, 1);
    }

    // ==================== Close Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_timer() {
        let (detector, mut rx) = detector(true);

        detector.handle_edit(snapshot("doc-1", 1, "hello"));
        assert!(detector.is_tracking(&DocumentId::from("doc-1")));

        detector.handle_close(&DocumentId::from("doc-1"));
        assert!(!detector.is_tracking(&DocumentId::from("doc-1")));

        sleep_ms(QUIET_MS * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_untracked_document_is_noop() {
        let (detector, _rx) = detector(true);
        detector.handle_close(&DocumentId::from("never-seen"));
        assert_eq!(detector.tracked_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reopened_document_starts_fresh() {
        let (detector, mut rx) = detector(true);

        detector.handle_edit(snapshot("doc-1", 1, "old"));
        let _ = rx.recv().await.unwrap();

        detector.handle_close(&DocumentId::from("doc-1"));
        detector.handle_edit(snapshot("doc-1", 1, "new"));

        let event = rx.recv().await.unwrap();
        // No stale previous content survives the close
        assert_eq!(event.previous_content, "new");
        assert_eq!(event.current_content, "new");
        assert_eq!(event.change_count, 1);
    }

    // ==================== Enable / Matcher Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_disabled_detector_ignores_edits() {
        let (detector, mut rx) = detector(false);

        detector.handle_edit(snapshot("doc-1", 1, "hello"));
        assert_eq!(detector.tracked_count(), 0);

        sleep_ms(QUIET_MS * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabling_clears_tracking_state() {
        let (detector, mut rx) = detector(true);

        detector.handle_edit(snapshot("doc-1", 1, "one"));
        detector.handle_edit(snapshot("doc-2", 1, "two"));
        assert_eq!(detector.tracked_count(), 2);

        detector.set_enabled(false);
        assert_eq!(detector.tracked_count(), 0);

        sleep_ms(QUIET_MS * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nonmatching_document_ignored() {
        let config = test_config(true);
        let (detector, mut rx) =
            IdleDetector::new(config, Box::new(|_: &DocumentMeta| Ok(false)));

        detector.handle_edit(snapshot("doc-1", 1, "hello"));
        assert_eq!(detector.tracked_count(), 0);

        sleep_ms(QUIET_MS * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_matcher_error_treated_as_nonmatch() {
        use coda_utils::CodaError;

        let config = test_config(true);
        let (detector, mut rx) = IdleDetector::new(
            config,
            Box::new(|_: &DocumentMeta| Err(CodaError::matcher("bad predicate"))),
        );

        detector.handle_edit(snapshot("doc-1", 1, "hello"));
        assert_eq!(detector.tracked_count(), 0);

        sleep_ms(QUIET_MS * 3).await;
        assert!(rx.try_recv().is_err());
    }

    // ==================== Shared Handle Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_state() {
        let (detector, mut rx) = detector(true);
        let clone = detector.clone();

        detector.handle_edit(snapshot("doc-1", 1, "a"));
        sleep_ms(QUIET_MS / 2).await;
        clone.handle_edit(snapshot("doc-1", 2, "ab"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.change_count, 2);
        assert_eq!(event.current_content, "ab");
    }
}
