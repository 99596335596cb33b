//! Shell dialect enumeration
//!
//! A fixed set of command-interpreter flavors. The extractor resolves a
//! dialect hint either from an explicit fence tag or by inference over the
//! extracted command text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognized command-interpreter flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellDialect {
    Bash,
    Sh,
    Zsh,
    Fish,
    PowerShell,
    Cmd,
}

impl ShellDialect {
    /// Map a fence language tag to a dialect, if the tag names a shell
    ///
    /// Tags are compared lower-cased. Generic tags ("text", "console", ...)
    /// deliberately do not map here.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "bash" | "shell-script" => Some(Self::Bash),
            "sh" => Some(Self::Sh),
            "zsh" => Some(Self::Zsh),
            "fish" => Some(Self::Fish),
            "powershell" | "pwsh" | "ps1" => Some(Self::PowerShell),
            "cmd" | "bat" | "batch" => Some(Self::Cmd),
            _ => None,
        }
    }

    /// Canonical lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Sh => "sh",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
            Self::PowerShell => "powershell",
            Self::Cmd => "cmd",
        }
    }

    /// Whether this dialect runs under a Windows interpreter
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::PowerShell | Self::Cmd)
    }
}

impl fmt::Display for ShellDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized dialect name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized shell dialect: {0}")]
pub struct DialectParseError(pub String);

impl FromStr for ShellDialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| DialectParseError(s.to_string()))
    }
}
