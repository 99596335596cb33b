//! coda-engine: Idle detection and command extraction for chat transcripts
//!
//! The engine watches host-supplied document edits, waits for a document to
//! go quiet, and extracts runnable shell commands from the fenced code
//! blocks in the newly added text. Hosts feed edits through an
//! [`IdleDetector`] and receive [`ReplyNotification`]s on a channel; what to
//! do with the commands is the host's business.
//!
//! # Wiring
//!
//! ```no_run
//! use coda_engine::config::new_config_handle;
//! use coda_engine::start;
//!
//! # async fn wire() {
//! let config = new_config_handle();
//! let (detector, mut notifications, pipeline) = start(config);
//!
//! // host loop: detector.handle_edit(snapshot) / detector.handle_close(&id)
//! while let Some(notification) = notifications.recv().await {
//!     if notification.extraction.has_commands() {
//!         println!("{}", notification.extraction.command_text());
//!     }
//! }
//! pipeline.stop().await;
//! # }
//! ```

pub mod config;
pub mod detect;
pub mod extract;
pub mod matcher;
pub mod pipeline;

pub use coda_protocol::{
    DocumentId, DocumentMeta, DocumentSnapshot, Extraction, FencedBlock, IdleEvent,
    ReplyNotification, ShellDialect,
};

pub use detect::{IdleDetector, IdleEventReceiver};
pub use matcher::{DocumentMatcher, PatternMatcher};
pub use pipeline::{NotificationReceiver, NotificationSender, PipelineHandle};

use config::ConfigHandle;
use tokio::sync::mpsc;

/// Assemble the full pipeline from a config handle
///
/// Builds a [`PatternMatcher`] from the `[documents]` section, wires the
/// detector's idle events into the extraction pipeline, and returns the
/// detector, the notification stream, and the pipeline handle for shutdown.
pub fn start(config: ConfigHandle) -> (IdleDetector, NotificationReceiver, PipelineHandle) {
    let matcher = PatternMatcher::from_config(&config.load().documents);
    start_with_matcher(config, Box::new(matcher))
}

/// Assemble the pipeline with a caller-supplied matcher
pub fn start_with_matcher(
    config: ConfigHandle,
    matcher: Box<dyn DocumentMatcher>,
) -> (IdleDetector, NotificationReceiver, PipelineHandle) {
    let (detector, events) = IdleDetector::new(config.clone(), matcher);
    let (notify_tx, notify_rx) = mpsc::unbounded_channel();
    let pipeline = PipelineHandle::spawn(config, events, notify_tx);
    (detector, notify_rx, pipeline)
}
