//! Document matcher predicate
//!
//! Decides which documents the idle detector tracks. The detector evaluates
//! the matcher once per edit; a failing matcher is logged and treated as
//! "does not match" so a bad pattern can never take detection down.

use regex::Regex;
use tracing::warn;

use coda_protocol::DocumentMeta;
use coda_utils::Result;

use crate::config::DocumentsConfig;

/// Predicate deciding whether a document is tracked
///
/// Implementations must not panic; errors are treated as non-match by the
/// caller.
pub trait DocumentMatcher: Send + Sync {
    fn matches(&self, meta: &DocumentMeta) -> Result<bool>;
}

// Closures work as matchers, which keeps tests terse.
impl<F> DocumentMatcher for F
where
    F: Fn(&DocumentMeta) -> Result<bool> + Send + Sync,
{
    fn matches(&self, meta: &DocumentMeta) -> Result<bool> {
        self(meta)
    }
}

/// Config-driven matcher: language ids, URI schemes, and title regexes
///
/// A document matches when any criterion hits. Patterns that fail to compile
/// are logged and skipped at construction time, so one bad pattern does not
/// disable the others.
pub struct PatternMatcher {
    languages: Vec<String>,
    schemes: Vec<String>,
    title_patterns: Vec<Regex>,
}

impl PatternMatcher {
    /// Build a matcher from the `[documents]` config section
    pub fn from_config(config: &DocumentsConfig) -> Self {
        let title_patterns = config
            .title_patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Invalid title pattern, skipping");
                    None
                }
            })
            .collect();

        Self {
            languages: config
                .languages
                .iter()
                .map(|l| l.to_lowercase())
                .collect(),
            schemes: config.schemes.clone(),
            title_patterns,
        }
    }
}

impl DocumentMatcher for PatternMatcher {
    fn matches(&self, meta: &DocumentMeta) -> Result<bool> {
        if self
            .languages
            .iter()
            .any(|l| l == &meta.language_id.to_lowercase())
        {
            return Ok(true);
        }

        if self.schemes.iter().any(|s| s == &meta.uri_scheme) {
            return Ok(true);
        }

        Ok(self
            .title_patterns
            .iter()
            .any(|re| re.is_match(&meta.title)))
    }
}
