//! coda-utils: Common utilities for coda
//!
//! Unified error type, logging setup, and XDG path helpers shared by the
//! engine and any front-end crates.

pub mod error;
pub mod logging;
pub mod paths;

pub use error::{CodaError, Result};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogOutput};
pub use paths::{cache_dir, config_dir, config_file, log_dir, runtime_dir, state_dir};
