//! Default configuration values
//!
//! These are embedded in the binary and used when no config file exists.

/// Default configuration as TOML, written out when no config file exists
pub const DEFAULT_CONFIG_TOML: &str = r##"
# coda configuration

[detector]
enabled = true
quiet_ms = 2000
log_firings = true

[documents]
languages = ["markdown", "plaintext"]
schemes = ["untitled"]
title_patterns = ["(?i)chat", "(?i)copilot", "(?i)claude"]

[extract]
lookback_chars = 200
"##;
