//! Idle-to-notification pipeline stage
//!
//! Consumes the detector's idle events, runs the extractor over the newly
//! added text, and forwards the result to the external listener. Runs as one
//! spawned task owned by a handle; the handle's `stop()` cancels the task
//! and waits for it to finish.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use coda_protocol::ReplyNotification;

use crate::config::ConfigHandle;
use crate::detect::IdleEventReceiver;
use crate::extract::extract_added_with_lookback;

/// Sender side of the listener channel
pub type NotificationSender = mpsc::UnboundedSender<ReplyNotification>;

/// Receiver side of the listener channel
pub type NotificationReceiver = mpsc::UnboundedReceiver<ReplyNotification>;

/// Handle to the running pipeline task
pub struct PipelineHandle {
    cancel_token: CancellationToken,
    join_handle: JoinHandle<()>,
    last: Arc<Mutex<Option<ReplyNotification>>>,
}

impl PipelineHandle {
    /// Spawn the pipeline task
    ///
    /// Every idle event produces exactly one notification, including ones
    /// with an empty extraction; the listener decides what is actionable.
    pub fn spawn(
        config: ConfigHandle,
        mut events: IdleEventReceiver,
        listener: NotificationSender,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        let last = Arc::new(Mutex::new(None));

        let token = cancel_token.clone();
        let last_slot = Arc::clone(&last);
        let join_handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("Pipeline cancelled");
                        break;
                    }
                    event = events.recv() => {
                        let Some(event) = event else {
                            debug!("Idle event channel closed, pipeline stopping");
                            break;
                        };

                        let lookback = config.load().extract.lookback_chars;
                        let extraction = extract_added_with_lookback(
                            &event.previous_content,
                            &event.current_content,
                            lookback,
                        );

                        if extraction.has_commands() {
                            info!(
                                document = %event.document.id,
                                commands = extraction.commands.len(),
                                "Extracted commands from finished reply"
                            );
                        }

                        let notification = ReplyNotification {
                            document: event.document,
                            change_count: event.change_count,
                            extraction,
                        };

                        *last_slot.lock() = Some(notification.clone());
                        if listener.send(notification).is_err() {
                            debug!("Notification listener dropped, pipeline stopping");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            cancel_token,
            join_handle,
            last,
        }
    }

    /// Cancel the pipeline without waiting for the task to exit
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Cancel the pipeline and wait for the task to finish
    pub async fn stop(self) {
        self.cancel_token.cancel();
        let _ = self.join_handle.await;
    }

    /// The most recent notification produced, if any
    pub fn last_notification(&self) -> Option<ReplyNotification> {
        self.last.lock().clone()
    }
}
