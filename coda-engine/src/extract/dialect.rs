//! Dialect inference over extracted command text
//!
//! Used only when the selected block carried no recognized shell tag.
//! Signatures are checked in priority order: PowerShell, then Windows CMD,
//! then Unix; commands with no signature default to bash.

use lazy_static::lazy_static;
use regex::Regex;

use coda_protocol::ShellDialect;

lazy_static! {
    /// PowerShell signatures: Verb-Noun commands, $env:, variable
    /// assignment, and [Type]:: bracket syntax
    static ref POWERSHELL_RE: Regex = Regex::new(
        r"(?im)^\s*(get|set|new|remove|invoke|start|stop|test|write|read|import|copy|select|foreach|where)-[a-z]+\b|\$env:|^\s*\$[a-z_][a-z0-9_]*\s*=|\[[a-z][a-z0-9.]*\]::"
    )
    .expect("Invalid PowerShell signature regex");

    /// Windows CMD builtins at line start
    static ref CMD_RE: Regex = Regex::new(
        r"(?im)^\s*(dir|copy|del|xcopy|robocopy|findstr|cls|ren|rd|md|ipconfig|tasklist|taskkill)\b"
    )
    .expect("Invalid CMD signature regex");

    /// Unix builtins and common tools at line start
    static ref UNIX_RE: Regex = Regex::new(
        r"(?im)^\s*(ls|cd|pwd|cat|cp|mv|rm|mkdir|touch|chmod|chown|grep|find|sed|awk|echo|export|source|sudo|tar|curl|wget|apt|apt-get|brew|npm|npx|yarn|pnpm|pip|pip3|cargo|git|docker|make)\b"
    )
    .expect("Invalid Unix signature regex");
}

/// Infer a dialect from cleaned command lines
///
/// Returns `None` only when there are no commands at all.
pub(crate) fn infer_dialect(commands: &[String]) -> Option<ShellDialect> {
    if commands.is_empty() {
        return None;
    }

    let joined = commands.join("\n");

    if POWERSHELL_RE.is_match(&joined) {
        return Some(ShellDialect::PowerShell);
    }
    if CMD_RE.is_match(&joined) {
        return Some(ShellDialect::Cmd);
    }
    if UNIX_RE.is_match(&joined) {
        return Some(ShellDialect::Bash);
    }

    // Commands exist but carry no signature
    Some(ShellDialect::Bash)
}
