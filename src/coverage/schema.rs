//! Report schema versions and their JSON key names.

use crate::config::Settings;
use crate::MulescanError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Setting key holding the schema version discriminator.
pub const LANGUAGE_VERSION_KEY: &str = "sonar.property.language";

/// Toolchain generation that produced the coverage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Mule 3 with MUnit 1.
    Mule3,
    /// Mule 4 with MUnit 2.
    Mule4,
}

impl SchemaVersion {
    /// Discriminator string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mule3 => "mule3",
            Self::Mule4 => "mule4",
        }
    }

    /// Parse a discriminator; only `mule4` selects Mule 4.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "mule4" => Self::Mule4,
            _ => Self::Mule3,
        }
    }

    /// Read the discriminator from host settings, defaulting to Mule 4 when
    /// the setting is absent.
    pub fn from_settings(settings: &dyn Settings) -> Self {
        settings
            .get(LANGUAGE_VERSION_KEY)
            .map(|v| Self::parse(&v))
            .unwrap_or(Self::Mule4)
    }

    /// Report location relative to the project base directory.
    pub fn report_relative_path(&self) -> PathBuf {
        let segments: &[&str] = match self {
            Self::Mule3 => &["target", "munit-reports", "coverage-json", "report.json"],
            Self::Mule4 => &["target", "site", "munit", "coverage", "munit-coverage.json"],
        };
        segments.iter().collect()
    }

    /// Report location under `base_dir`.
    pub fn report_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.report_relative_path())
    }

    /// Built-in key names for this version.
    pub fn property_schema(&self) -> PropertySchema {
        match self {
            Self::Mule3 => PropertySchema {
                name: "name".to_string(),
                files: "files".to_string(),
                flows: "flows".to_string(),
                coverage: "coverage".to_string(),
                processor_count: "messageProcessorCount".to_string(),
                covered_processor_count: "coveredProcessorCount".to_string(),
            },
            Self::Mule4 => PropertySchema {
                name: "name".to_string(),
                files: "files".to_string(),
                flows: "flows".to_string(),
                coverage: "coverage".to_string(),
                processor_count: "messageProcessorCount".to_string(),
                covered_processor_count: "coveredProcessorCount".to_string(),
            },
        }
    }
}

/// JSON key names used by one report schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    /// Key of a file entry's name.
    pub name: String,
    /// Key of the file entry array.
    pub files: String,
    /// Key of a file's flow array.
    pub flows: String,
    /// Key of the aggregate coverage figure.
    pub coverage: String,
    /// Key of a flow's processor count.
    pub processor_count: String,
    /// Key of a flow's covered processor count.
    pub covered_processor_count: String,
}

impl PropertySchema {
    /// Load key names from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, MulescanError> {
        serde_json::from_str(json)
            .map_err(|e| MulescanError::ConfigError(format!("Invalid property schema: {}", e)))
    }
}
