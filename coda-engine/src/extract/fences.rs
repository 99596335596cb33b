//! Fenced code block scanning
//!
//! Finds triple-backtick regions across a whole text. The pattern is
//! non-greedy so adjacent fences are separated correctly. Blocks whose
//! trimmed content is empty are discarded here and never reach the
//! classification stages.

use lazy_static::lazy_static;
use regex::Regex;

use coda_protocol::FencedBlock;

lazy_static! {
    /// Triple-backtick fence with optional language tag:
    /// ``` tag \n content ```
    static ref FENCE_RE: Regex =
        Regex::new(r"(?s)```([A-Za-z0-9_+.\-]*)[ \t]*\r?\n(.*?)```").expect("Invalid fence regex");
}

/// Scan the text for fenced code blocks
///
/// Returns blocks in source order with byte offsets into `text`. Language
/// tags are lower-cased; whitespace-only blocks are dropped.
pub fn scan_fences(text: &str) -> Vec<FencedBlock> {
    FENCE_RE
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0).expect("match has group 0");
            let tag = cap.get(1).map(|m| m.as_str()).unwrap_or("");
            let inner = cap.get(2).map(|m| m.as_str()).unwrap_or("");

            let trimmed = inner.trim();
            if trimmed.is_empty() {
                return None;
            }

            Some(FencedBlock {
                language: tag.to_lowercase(),
                content: trimmed.to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}
