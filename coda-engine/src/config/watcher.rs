//! File watcher for configuration hot-reload

use std::path::PathBuf;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, FileIdMap};
use tokio::sync::mpsc;

use coda_utils::{config_dir, CodaError, Result};

use super::{ConfigHandle, ConfigLoader};
use crate::detect::IdleDetector;

/// Watches configuration files for changes
pub struct ConfigWatcher {
    /// Directory being watched
    config_dir: PathBuf,
    /// Channel receiver for events
    rx: mpsc::UnboundedReceiver<Result<Vec<Event>>>,
    /// Debouncer handle (kept alive)
    _debouncer: Debouncer<RecommendedWatcher, FileIdMap>,
}

impl ConfigWatcher {
    /// Create a new config watcher
    pub fn new() -> Result<Self> {
        let config_dir = config_dir();

        // Ensure directory exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| CodaError::FileWrite {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let (tx, rx) = mpsc::unbounded_channel();

        // Create debounced watcher
        let mut debouncer = new_debouncer(
            Duration::from_millis(100),
            None,
            move |result: DebounceEventResult| {
                let events = result
                    .map(|events| events.into_iter().map(|e| e.event).collect())
                    .map_err(|errs| CodaError::config(format!("Watch error: {:?}", errs)));
                let _ = tx.send(events);
            },
        )
        .map_err(|e| CodaError::config(format!("Failed to create watcher: {}", e)))?;

        // Watch the config directory
        debouncer
            .watcher()
            .watch(&config_dir, RecursiveMode::NonRecursive)
            .map_err(|e| CodaError::config(format!("Failed to watch: {}", e)))?;

        Ok(Self {
            config_dir,
            rx,
            _debouncer: debouncer,
        })
    }

    /// Run the watcher loop, updating config on changes
    ///
    /// The detector is informed when the enable flag flips so that disabling
    /// discards all tracked state immediately.
    pub async fn run(mut self, config: ConfigHandle, detector: IdleDetector) {
        tracing::info!("Config watcher started for {:?}", self.config_dir);

        while let Some(result) = self.rx.recv().await {
            match result {
                Ok(events) => {
                    for event in events {
                        if Self::is_config_change(&event) {
                            self.handle_change(&config, &detector);
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Config watch error: {}", e);
                }
            }
        }
    }

    /// Check if an event is a config file change
    fn is_config_change(event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event.paths.iter().any(|p| {
                p.file_name()
                    .map(|n| n == "config.toml")
                    .unwrap_or(false)
            })
    }

    /// Handle a configuration change
    fn handle_change(&self, config: &ConfigHandle, detector: &IdleDetector) {
        tracing::info!("Config file changed, reloading...");

        match ConfigLoader::load_and_validate() {
            Ok(new_config) => {
                let old_config = config.load();
                let enabled_changed = old_config.detector.enabled != new_config.detector.enabled;
                let new_enabled = new_config.detector.enabled;

                // Atomically swap config
                config.store(std::sync::Arc::new(new_config));

                if enabled_changed {
                    detector.set_enabled(new_enabled);
                }

                tracing::info!("Configuration reloaded successfully");
            }
            Err(e) => {
                tracing::error!("Config reload failed (keeping previous): {}", e);
            }
        }
    }
}
