//! Extraction result types
//!
//! The extractor reduces one document's text to a list of cleaned command
//! strings, an optional dialect hint, and the fenced blocks it considered.

use serde::{Deserialize, Serialize};

use crate::dialect::ShellDialect;
use crate::document::DocumentMeta;

/// A fenced code region found in the source text
///
/// Intermediate data: lives only for the duration of one extraction call,
/// but is carried on the result for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FencedBlock {
    /// Language tag, lower-cased; empty when the fence is untagged
    pub language: String,
    /// Trimmed inner text (never empty; whitespace-only blocks are discarded)
    pub content: String,
    /// Byte offset of the opening fence in the scanned text
    pub start: usize,
    /// Byte offset one past the closing fence in the scanned text
    pub end: usize,
}

impl FencedBlock {
    /// Whether the fence carried any language tag
    pub fn is_tagged(&self) -> bool {
        !self.language.is_empty()
    }
}

/// Result of one extraction call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Cleaned, directly-runnable command strings in source order
    pub commands: Vec<String>,
    /// Best-effort shell dialect; `None` when no commands were produced
    pub language_hint: Option<ShellDialect>,
    /// All non-empty fenced blocks found in the scanned text (diagnostic)
    pub blocks: Vec<FencedBlock>,
}

impl Extraction {
    /// Neutral result: no commands, no hint, no blocks
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether at least one command was extracted
    pub fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    /// Commands joined by newlines, ready to paste into a terminal
    pub fn command_text(&self) -> String {
        self.commands.join("\n")
    }
}

/// Output of the pipeline, delivered to the external listener
///
/// Combines the idle-event context with the extraction run on the newly
/// added text. The notification layer turns this into a user-facing action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyNotification {
    /// Document whose reply finished
    pub document: DocumentMeta,
    /// Edits observed since the previous idle firing
    pub change_count: u32,
    /// Commands extracted from the finished reply
    pub extraction: Extraction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_extraction() {
        let extraction = Extraction::empty();
        assert!(!extraction.has_commands());
        assert!(extraction.language_hint.is_none());
        assert!(extraction.blocks.is_empty());
        assert_eq!(extraction.command_text(), "");
    }

    #[test]
    fn test_command_text_joins_lines() {
        let extraction = Extraction {
            commands: vec!["npm install".into(), "npm run build".into()],
            language_hint: Some(ShellDialect::Bash),
            blocks: vec![],
        };
        assert!(extraction.has_commands());
        assert_eq!(extraction.command_text(), "npm install\nnpm run build");
    }

    #[test]
    fn test_block_is_tagged() {
        let tagged = FencedBlock {
            language: "bash".into(),
            content: "ls".into(),
            start: 0,
            end: 10,
        };
        assert!(tagged.is_tagged());

        let untagged = FencedBlock {
            language: String::new(),
            content: "ls".into(),
            start: 0,
            end: 10,
        };
        assert!(!untagged.is_tagged());
    }

    #[test]
    fn test_notification_serde_round_trip() {
        let notification = ReplyNotification {
            document: DocumentMeta::new("doc-1", "markdown", "untitled", "Chat"),
            change_count: 4,
            extraction: Extraction {
                commands: vec!["cargo test".into()],
                language_hint: Some(ShellDialect::Bash),
                blocks: vec![],
            },
        };

        let json = serde_json::to_string(&notification).unwrap();
        let back: ReplyNotification = serde_json::from_str(&json).unwrap();
        assert_eq!(back.change_count, 4);
        assert_eq!(back.extraction.commands, vec!["cargo test".to_string()]);
        assert_eq!(back.extraction.language_hint, Some(ShellDialect::Bash));
    }
}
