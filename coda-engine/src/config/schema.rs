//! Configuration schema structs

use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub detector: DetectorConfig,
    pub documents: DocumentsConfig,
    pub extract: ExtractConfig,
}

/// Idle detector settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Whether edit tracking is enabled at all
    pub enabled: bool,
    /// Quiet period in milliseconds before a document is considered idle.
    /// Read each time a timer is (re)armed; changes apply to subsequently
    /// armed timers, not to one already running.
    pub quiet_ms: u64,
    /// Log a line each time a document goes idle
    pub log_firings: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quiet_ms: 2000,
            log_firings: true,
        }
    }
}

impl DetectorConfig {
    /// Quiet period as a Duration
    pub fn quiet_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.quiet_ms)
    }
}

/// Which documents the detector tracks
///
/// A document is tracked when any criterion matches: its language id is
/// listed, its URI scheme is listed, or any title pattern matches its title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    /// Language identifiers to track (compared lower-cased)
    pub languages: Vec<String>,
    /// URI schemes to track
    pub schemes: Vec<String>,
    /// Regex patterns matched against the document title
    pub title_patterns: Vec<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            languages: vec!["markdown".into(), "plaintext".into()],
            schemes: vec!["untitled".into()],
            title_patterns: vec![
                "(?i)chat".into(),
                "(?i)copilot".into(),
                "(?i)claude".into(),
            ],
        }
    }
}

/// Command extractor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// How many characters before a fence to scan for execution keywords
    /// in the final fallback stage
    pub lookback_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            lookback_chars: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.detector.enabled);
        assert_eq!(config.detector.quiet_ms, 2000);
        assert_eq!(config.extract.lookback_chars, 200);
        assert!(config.documents.languages.contains(&"markdown".to_string()));
    }

    #[test]
    fn test_quiet_period_conversion() {
        let detector = DetectorConfig {
            quiet_ms: 1500,
            ..Default::default()
        };
        assert_eq!(
            detector.quiet_period(),
            std::time::Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [detector]
            quiet_ms = 3000
            "#,
        )
        .unwrap();

        assert_eq!(config.detector.quiet_ms, 3000);
        assert!(config.detector.enabled);
        assert_eq!(config.extract.lookback_chars, 200);
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.detector.quiet_ms, config.detector.quiet_ms);
        assert_eq!(back.documents.languages, config.documents.languages);
    }
}
