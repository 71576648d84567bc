//! Coverage sensor: locate, ingest and publish the MUnit report.

use crate::config::Settings;
use crate::coverage::publish::{publish_coverage, CoverageSink, InputFile};
use crate::coverage::report::ingest_report;
use crate::coverage::schema::{PropertySchema, SchemaVersion};
use crate::language::{MuleLanguage, LANGUAGE_KEY};
use std::path::Path;
use tracing::{debug, error};

/// Sensor description shown by the host.
pub const SENSOR_NAME: &str = "Compute the coverage of the applications";

/// Turns an MUnit coverage report into per-file line hits.
#[derive(Debug, Clone)]
pub struct CoverageSensor {
    version: SchemaVersion,
    schema: PropertySchema,
    language: MuleLanguage,
}

impl CoverageSensor {
    /// Create a sensor for an explicit version and key set.
    pub fn new(version: SchemaVersion, schema: PropertySchema, language: MuleLanguage) -> Self {
        Self {
            version,
            schema,
            language,
        }
    }

    /// Create a sensor using the version, built-in keys and language
    /// selected by host settings.
    pub fn from_settings(settings: &dyn Settings) -> Self {
        let version = SchemaVersion::from_settings(settings);
        Self::new(
            version,
            version.property_schema(),
            MuleLanguage::from_settings(settings),
        )
    }

    /// Sensor name.
    pub fn name(&self) -> &'static str {
        SENSOR_NAME
    }

    /// Language this sensor runs on.
    pub fn language_key(&self) -> &'static str {
        LANGUAGE_KEY
    }

    /// Active schema version.
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Run the sensor over a project.
    ///
    /// A missing report is skipped silently. An unreadable or malformed
    /// report is logged and nothing is published. Returns how many files got
    /// coverage.
    pub fn execute(
        &self,
        base_dir: &Path,
        files: &[InputFile],
        sink: &mut dyn CoverageSink,
    ) -> usize {
        let report = self.version.report_path(base_dir);
        if !report.exists() {
            debug!("No {} coverage report at {}", self.version.as_str(), report.display());
            return 0;
        }

        let coverage = match ingest_report(&report, &self.schema) {
            Ok(coverage) => coverage,
            Err(e) => {
                error!("Failed to load coverage report {}: {}", report.display(), e);
                return 0;
            }
        };

        let mule_files = files.iter().filter(|f| self.language.accepts(f.path()));
        publish_coverage(&coverage, mule_files, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::publish::InMemoryCoverage;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn write_report(base: &Path, version: SchemaVersion, json: &str) {
        let path = version.report_path(base);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, json).unwrap();
    }

    #[test]
    fn test_from_settings_selects_version() {
        let mut settings = HashMap::new();
        settings.insert(
            crate::coverage::schema::LANGUAGE_VERSION_KEY.to_string(),
            "mule3".to_string(),
        );
        let sensor = CoverageSensor::from_settings(&settings);

        assert_eq!(sensor.version(), SchemaVersion::Mule3);
        assert_eq!(sensor.language_key(), "mule");
        assert_eq!(sensor.name(), SENSOR_NAME);
    }

    #[test]
    fn test_report_of_other_version_is_ignored() {
        let dir = TempDir::new().unwrap();
        write_report(
            dir.path(),
            SchemaVersion::Mule3,
            r#"{"coverage": 1, "files": [{"name": "a.xml", "flows": []}]}"#,
        );

        let sensor = CoverageSensor::from_settings(&HashMap::<String, String>::new());
        let mut sink = InMemoryCoverage::new();
        let published = sensor.execute(dir.path(), &[InputFile::new("a.xml")], &mut sink);

        assert_eq!(published, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_non_mule_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_report(
            dir.path(),
            SchemaVersion::Mule4,
            r#"{"coverage": 1, "files": [{"name": "a.yaml",
                "flows": [{"messageProcessorCount": 1, "coveredProcessorCount": 1}]}]}"#,
        );

        let sensor = CoverageSensor::from_settings(&HashMap::<String, String>::new());
        let mut sink = InMemoryCoverage::new();
        let published = sensor.execute(dir.path(), &[InputFile::new("conf/a.yaml")], &mut sink);

        assert_eq!(published, 0);
    }
}
