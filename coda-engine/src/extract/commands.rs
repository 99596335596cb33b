//! Command line cleaning
//!
//! Reduces one selected block to runnable command lines: drops blanks and
//! comments, strips leading prompt markers, and drops lines that look like
//! captured output rather than input.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Windows drive prompt prefix, e.g. `C:\Users\me> `
    static ref DRIVE_PROMPT_PREFIX_RE: Regex =
        Regex::new(r"^[A-Za-z]:\\[^>]*>\s?").expect("Invalid drive prompt regex");
}

/// Characters that mark a line as captured output, not input
const OUTPUT_MARKERS: &[char] = &['|', '+', '-', '*', '>', '<'];

/// Clean one block's content into runnable command lines, order preserved
pub(crate) fn clean_block(content: &str) -> Vec<String> {
    content.lines().filter_map(clean_line).collect()
}

/// Clean a single line; `None` when the line carries no command
fn clean_line(line: &str) -> Option<String> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return None;
    }

    // Comment lines
    if line.starts_with('#') || line.starts_with("//") {
        return None;
    }

    let stripped = strip_prompt(line).trim();
    if stripped.is_empty() {
        return None;
    }

    // Checked after prompt stripping: "> make test" is a prompt, ">foo" and
    // "| column" are captured output.
    if stripped.starts_with(OUTPUT_MARKERS) {
        return None;
    }

    Some(stripped.to_string())
}

/// Strip one leading prompt marker, if present
fn strip_prompt(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("$ ") {
        return rest;
    }
    if let Some(rest) = line.strip_prefix("PS> ") {
        return rest;
    }
    if let Some(m) = DRIVE_PROMPT_PREFIX_RE.find(line) {
        return &line[m.end()..];
    }
    if let Some(rest) = line.strip_prefix("> ") {
        return rest;
    }
    line
}
