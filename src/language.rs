//! Mule configuration language definition.

use crate::config::Settings;
use std::path::Path;

/// Language key registered with the host.
pub const LANGUAGE_KEY: &str = "mule";

/// Display name registered with the host.
pub const LANGUAGE_NAME: &str = "Mule";

/// Setting key overriding the file suffixes (comma separated).
pub const FILE_SUFFIXES_KEY: &str = "sonar.mule.file.suffixes";

/// Default file suffixes.
pub const FILE_SUFFIXES_DEFAULT: &str = ".xml";

/// Setting key overriding the file patterns (comma separated).
pub const FILE_PATTERNS_KEY: &str = "sonar.lang.patterns.mule";

/// Default file patterns.
pub const FILE_PATTERNS_DEFAULT: &str = "**/*.xml";

/// File suffixes and patterns that make up the Mule language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuleLanguage {
    file_suffixes: Vec<String>,
    file_patterns: Vec<String>,
}

impl Default for MuleLanguage {
    fn default() -> Self {
        Self {
            file_suffixes: split_list(FILE_SUFFIXES_DEFAULT),
            file_patterns: split_list(FILE_PATTERNS_DEFAULT),
        }
    }
}

impl MuleLanguage {
    /// Build from host settings, falling back to defaults for blank values.
    pub fn from_settings(settings: &dyn Settings) -> Self {
        let list = |key: &str, default: &str| {
            let values = settings
                .get(key)
                .map(|v| split_list(&v))
                .unwrap_or_default();
            if values.is_empty() {
                split_list(default)
            } else {
                values
            }
        };

        Self {
            file_suffixes: list(FILE_SUFFIXES_KEY, FILE_SUFFIXES_DEFAULT),
            file_patterns: list(FILE_PATTERNS_KEY, FILE_PATTERNS_DEFAULT),
        }
    }

    /// File suffixes, e.g. `.xml`.
    pub fn file_suffixes(&self) -> &[String] {
        &self.file_suffixes
    }

    /// File patterns, e.g. `**/*.xml`.
    ///
    /// Handed to the host for file indexing; [`MuleLanguage::accepts`] only
    /// checks suffixes.
    pub fn file_patterns(&self) -> &[String] {
        &self.file_patterns
    }

    /// Whether `path` ends with one of the file suffixes (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        self.file_suffixes
            .iter()
            .any(|suffix| name.ends_with(&suffix.to_ascii_lowercase()))
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
