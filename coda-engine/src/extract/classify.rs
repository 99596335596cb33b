//! Block classification heuristics
//!
//! The heuristic tables live here as data, separate from the stage control
//! flow in the parent module. A block "looks like shell commands" when
//! strictly more than half of its non-empty lines match some command shape.

use lazy_static::lazy_static;
use regex::Regex;

/// Tags treated as generic in the untagged/generic fallback stage
const GENERIC_TAGS: &[&str] = &[
    "", "text", "plaintext", "plain", "txt", "shell", "terminal", "console",
];

/// Package manager invocations
const PACKAGE_MANAGERS: &[&str] = &[
    "npm", "npx", "yarn", "pnpm", "pip", "pip3", "pipx", "cargo", "gem", "bundle", "composer",
    "apt", "apt-get", "dnf", "yum", "pacman", "brew", "choco", "winget",
];

/// Common CLI tool names
const CLI_TOOLS: &[&str] = &[
    "git", "docker", "docker-compose", "kubectl", "helm", "terraform", "make", "cmake", "python",
    "python3", "node", "deno", "bun", "go", "rustc", "rustup", "java", "mvn", "gradle", "dotnet",
    "aws", "gcloud", "az", "ssh", "scp", "rsync", "curl", "wget", "systemctl",
];

/// Common Unix commands
const UNIX_COMMANDS: &[&str] = &[
    "ls", "cd", "pwd", "cat", "cp", "mv", "rm", "rmdir", "mkdir", "touch", "ln", "chmod", "chown",
    "grep", "find", "sed", "awk", "head", "tail", "echo", "printf", "export", "source", "env",
    "which", "tar", "gzip", "unzip", "sudo", "kill", "ps",
];

/// Common Windows commands
const WINDOWS_COMMANDS: &[&str] = &[
    "dir", "copy", "move", "del", "md", "rd", "cls", "set", "type", "ren", "xcopy", "robocopy",
    "findstr", "ipconfig", "tasklist", "taskkill",
];

lazy_static! {
    /// Windows drive prompt, e.g. `C:\Users\me>`
    static ref DRIVE_PROMPT_RE: Regex =
        Regex::new(r"^[A-Za-z]:\\[^>]*>").expect("Invalid drive prompt regex");

    /// Generic "word followed by space" command shape
    static ref GENERIC_SHAPE_RE: Regex =
        Regex::new(r"^[a-z][a-z0-9_.+\-]*\s+\S").expect("Invalid command shape regex");

    /// Execution-indicating words scanned before a fence in the final stage
    static ref EXEC_KEYWORD_RE: Regex =
        Regex::new(r"(?i)\b(run|execute|command|terminal|shell|type|enter)\b")
            .expect("Invalid exec keyword regex");
}

/// Whether a tag is absent or generic enough for the fallback stage
pub(crate) fn is_generic_tag(tag: &str) -> bool {
    GENERIC_TAGS.contains(&tag)
}

/// Whether one trimmed line matches some command shape
pub(crate) fn is_command_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }

    // Shell-prompt markers
    if line.starts_with("$ ") || line.starts_with("PS>") || DRIVE_PROMPT_RE.is_match(line) {
        return true;
    }

    // Known command names in first position
    if let Some(first) = line.split_whitespace().next() {
        let first = first.to_lowercase();
        if PACKAGE_MANAGERS.contains(&first.as_str())
            || CLI_TOOLS.contains(&first.as_str())
            || UNIX_COMMANDS.contains(&first.as_str())
            || WINDOWS_COMMANDS.contains(&first.as_str())
        {
            return true;
        }
    }

    GENERIC_SHAPE_RE.is_match(line)
}

/// Whether a block's content heuristically looks like shell commands
///
/// Strictly more than half of the non-empty lines must match; a block with
/// zero lines never qualifies.
pub(crate) fn looks_like_shell(content: &str) -> bool {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return false;
    }

    let matching = lines.iter().filter(|l| is_command_line(l)).count();
    matching * 2 > lines.len()
}

/// Whether an execution keyword appears within the lookback window before
/// `block_start` (a byte offset into `text`)
pub(crate) fn keyword_precedes(text: &str, block_start: usize, lookback_chars: usize) -> bool {
    let prefix = &text[..block_start];

    let mut window_start = 0;
    for (count, (idx, _)) in prefix.char_indices().rev().enumerate() {
        window_start = idx;
        if count + 1 == lookback_chars {
            break;
        }
    }

    EXEC_KEYWORD_RE.is_match(&prefix[window_start..])
}
