//! Command extraction pipeline
//!
//! Given one document's text, finds fenced code blocks, classifies which
//! blocks hold executable shell content, and reduces the winner to cleaned
//! command lines plus a dialect hint.
//!
//! Candidate selection is a fixed fallback chain; each stage only runs when
//! the previous one yielded nothing, and the result always comes from
//! exactly one stage:
//!
//! 1. blocks with an explicit shell tag (bash, zsh, powershell, ...)
//! 2. untagged/generic blocks whose content looks like shell commands
//! 3. blocks preceded by an execution keyword within a lookback window,
//!    still required to look like shell commands

mod classify;
mod commands;
mod dialect;
mod fences;

pub use fences::scan_fences;

use coda_protocol::{Extraction, FencedBlock, ShellDialect};

/// Default lookback window for the keyword fallback stage, in characters
pub const DEFAULT_LOOKBACK_CHARS: usize = 200;

/// Extract commands from the full text with the default lookback window
pub fn extract(text: &str) -> Extraction {
    extract_with_lookback(text, DEFAULT_LOOKBACK_CHARS)
}

/// Extract commands from the full text
pub fn extract_with_lookback(text: &str, lookback_chars: usize) -> Extraction {
    let blocks = scan_fences(text);
    if blocks.is_empty() {
        return Extraction {
            commands: Vec::new(),
            language_hint: None,
            blocks,
        };
    }

    let candidates = select_candidates(text, &blocks, lookback_chars);

    // Last-block bias: the most recent fenced block is assumed to be the
    // most relevant to the just-finished reply.
    let (commands, language_hint) = match candidates.last() {
        Some(block) => {
            let commands = commands::clean_block(&block.content);
            let hint = if commands.is_empty() {
                None
            } else {
                ShellDialect::from_tag(&block.language)
                    .or_else(|| dialect::infer_dialect(&commands))
            };
            (commands, hint)
        }
        None => (Vec::new(), None),
    };

    Extraction {
        commands,
        language_hint,
        blocks,
    }
}

/// Diff-based variant biased toward freshly streamed content
///
/// When the current text is strictly longer than the previous text, only the
/// appended suffix is scanned. A fence opened before the boundary and closed
/// inside it is not recognized; that gap is deliberate, trading completeness
/// for not re-scanning a long transcript on every idle cycle. On replacement
/// or shrink the full current text is scanned.
pub fn extract_added(previous: &str, current: &str) -> Extraction {
    extract_added_with_lookback(previous, current, DEFAULT_LOOKBACK_CHARS)
}

/// Diff-based variant with an explicit lookback window
pub fn extract_added_with_lookback(
    previous: &str,
    current: &str,
    lookback_chars: usize,
) -> Extraction {
    if current.len() > previous.len() {
        let mut boundary = previous.len();
        while boundary < current.len() && !current.is_char_boundary(boundary) {
            boundary += 1;
        }
        extract_with_lookback(&current[boundary..], lookback_chars)
    } else {
        extract_with_lookback(current, lookback_chars)
    }
}

/// Run the stage chain; the result comes from exactly one stage
fn select_candidates<'a>(
    text: &str,
    blocks: &'a [FencedBlock],
    lookback_chars: usize,
) -> Vec<&'a FencedBlock> {
    // Stage A: explicit shell tag
    let tagged: Vec<&FencedBlock> = blocks
        .iter()
        .filter(|b| ShellDialect::from_tag(&b.language).is_some())
        .collect();
    if !tagged.is_empty() {
        return tagged;
    }

    // Stage B: generic/untagged tag with shell-shaped content
    let generic: Vec<&FencedBlock> = blocks
        .iter()
        .filter(|b| classify::is_generic_tag(&b.language) && classify::looks_like_shell(&b.content))
        .collect();
    if !generic.is_empty() {
        return generic;
    }

    // Stage C: execution keyword in the lookback window, still shell-shaped
    blocks
        .iter()
        .filter(|b| {
            classify::keyword_precedes(text, b.start, lookback_chars)
                && classify::looks_like_shell(&b.content)
        })
        .collect()
}
