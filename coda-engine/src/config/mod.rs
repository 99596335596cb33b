//! Configuration management for the coda engine
//!
//! Provides hot-reloading configuration with lock-free reads using ArcSwap.
//! The detector reads the handle on every edit and timer arm, so reloaded
//! values apply to subsequent activity without restarting anything.

mod defaults;
mod loader;
mod schema;
mod watcher;

pub use defaults::DEFAULT_CONFIG_TOML;
pub use loader::ConfigLoader;
pub use schema::*;
pub use watcher::ConfigWatcher;

use arc_swap::ArcSwap;
use std::sync::Arc;

/// Global configuration handle
pub type ConfigHandle = Arc<ArcSwap<AppConfig>>;

/// Create a new config handle with defaults
pub fn new_config_handle() -> ConfigHandle {
    Arc::new(ArcSwap::from_pointee(AppConfig::default()))
}

/// Create a config handle holding the given configuration
pub fn config_handle_from(config: AppConfig) -> ConfigHandle {
    Arc::new(ArcSwap::from_pointee(config))
}
