//! MUnit coverage report parsing.
//!
//! The report is read whole, then walked through the key names of a
//! [`PropertySchema`]: files, then each file's flows, summing processor
//! counts per file. Files are keyed by base name, so `src/main/app/a.xml`
//! and `a.xml` land on the same entry; a later entry with the same base
//! name replaces an earlier one.

use crate::coverage::counter::FlowCoverageCounter;
use crate::coverage::schema::PropertySchema;
use crate::MulescanError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Coverage counters keyed by source file base name.
pub type CoverageMap = BTreeMap<String, FlowCoverageCounter>;

/// Read and parse the report at `path`.
pub fn ingest_report(
    path: &Path,
    schema: &PropertySchema,
) -> Result<CoverageMap, MulescanError> {
    let json = fs::read_to_string(path).map_err(|e| {
        MulescanError::ReportIO(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_report(&json, schema)
}

/// Parse report JSON into per-file counters.
pub fn parse_report(json: &str, schema: &PropertySchema) -> Result<CoverageMap, MulescanError> {
    let root: Value = serde_json::from_str(json)
        .map_err(|e| MulescanError::ReportFormat(format!("Invalid JSON: {}", e)))?;

    let total = field(&root, &schema.coverage)?;
    debug!("Total coverage: {}", total);

    let mut coverage = CoverageMap::new();
    for file in array(&root, &schema.files)? {
        let name = field(file, &schema.name)?
            .as_str()
            .ok_or_else(|| {
                MulescanError::ReportFormat(format!("\"{}\" is not a string", schema.name))
            })?;

        let mut counter = FlowCoverageCounter::new();
        for flow in array(file, &schema.flows)? {
            counter.add_processors(count(flow, &schema.processor_count)?);
            counter.add_covered_processors(count(flow, &schema.covered_processor_count)?);
        }

        debug!(
            "File {}: {}/{} processors covered",
            name,
            counter.covered_processors(),
            counter.processors()
        );
        coverage.insert(base_name(name).to_string(), counter);
    }

    Ok(coverage)
}

/// Final path segment of `name`, splitting on `/` and `\`.
pub fn base_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name)
}

fn field<'a>(node: &'a Value, key: &str) -> Result<&'a Value, MulescanError> {
    node.get(key)
        .ok_or_else(|| MulescanError::ReportFormat(format!("missing \"{}\"", key)))
}

fn array<'a>(node: &'a Value, key: &str) -> Result<&'a Vec<Value>, MulescanError> {
    field(node, key)?
        .as_array()
        .ok_or_else(|| MulescanError::ReportFormat(format!("\"{}\" is not an array", key)))
}

fn count(node: &Value, key: &str) -> Result<u64, MulescanError> {
    field(node, key)?.as_u64().ok_or_else(|| {
        MulescanError::ReportFormat(format!("\"{}\" is not a non-negative integer", key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::schema::SchemaVersion;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SINGLE_FILE_REPORT: &str = r#"{
        "coverage": 40.0,
        "files": [
            {
                "name": "src/main/mule/orders.xml",
                "coverage": 40.0,
                "flows": [
                    {"name": "create-order", "messageProcessorCount": 3, "coveredProcessorCount": 2},
                    {"name": "cancel-order", "messageProcessorCount": 2, "coveredProcessorCount": 0}
                ]
            }
        ]
    }"#;

    fn schema() -> PropertySchema {
        SchemaVersion::Mule4.property_schema()
    }

    #[test]
    fn test_parse_sums_flows_per_file() {
        let coverage = parse_report(SINGLE_FILE_REPORT, &schema()).unwrap();

        assert_eq!(coverage.len(), 1);
        let counter = coverage["orders.xml"];
        assert_eq!(counter.processors(), 5);
        assert_eq!(counter.covered_processors(), 2);
    }

    #[test]
    fn test_parse_file_without_flows() {
        let json = r#"{"coverage": 0, "files": [{"name": "empty.xml", "flows": []}]}"#;
        let coverage = parse_report(json, &schema()).unwrap();
        assert_eq!(coverage["empty.xml"], FlowCoverageCounter::new());
    }

    #[test]
    fn test_duplicate_base_name_last_wins() {
        let json = r#"{"coverage": 0, "files": [
            {"name": "a/api.xml", "flows": [{"messageProcessorCount": 4, "coveredProcessorCount": 4}]},
            {"name": "b/api.xml", "flows": [{"messageProcessorCount": 1, "coveredProcessorCount": 0}]}
        ]}"#;
        let coverage = parse_report(json, &schema()).unwrap();
        assert_eq!(coverage["api.xml"].processors(), 1);
    }

    #[test]
    fn test_parse_custom_schema_keys() {
        let schema = PropertySchema {
            name: "file".to_string(),
            files: "resources".to_string(),
            flows: "units".to_string(),
            coverage: "total".to_string(),
            processor_count: "processors".to_string(),
            covered_processor_count: "covered".to_string(),
        };
        let json = r#"{"total": "55%", "resources": [
            {"file": "x.xml", "units": [{"processors": 2, "covered": 1}]}
        ]}"#;

        let coverage = parse_report(json, &schema).unwrap();
        assert_eq!(coverage["x.xml"].covered_processors(), 1);
    }

    #[test]
    fn test_missing_files_key_is_format_error() {
        let result = parse_report(r#"{"coverage": 10}"#, &schema());
        assert!(matches!(result, Err(MulescanError::ReportFormat(_))));
    }

    #[test]
    fn test_missing_total_coverage_is_format_error() {
        let result = parse_report(r#"{"files": []}"#, &schema());
        assert!(matches!(result, Err(MulescanError::ReportFormat(_))));
    }

    #[test]
    fn test_non_numeric_count_is_format_error() {
        let json = r#"{"coverage": 0, "files": [
            {"name": "x.xml", "flows": [{"messageProcessorCount": "three", "coveredProcessorCount": 0}]}
        ]}"#;
        assert!(parse_report(json, &schema()).is_err());
    }

    #[test]
    fn test_invalid_json_is_format_error() {
        let result = parse_report("{not json", &schema());
        assert!(matches!(result, Err(MulescanError::ReportFormat(_))));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/Flow.xml"), "Flow.xml");
        assert_eq!(base_name("a\\b\\Flow.xml"), "Flow.xml");
        assert_eq!(base_name("Flow.xml"), "Flow.xml");
    }

    #[test]
    fn test_ingest_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SINGLE_FILE_REPORT.as_bytes()).unwrap();

        let coverage = ingest_report(file.path(), &schema()).unwrap();
        assert!(coverage.contains_key("orders.xml"));
    }

    #[test]
    fn test_ingest_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ingest_report(&dir.path().join("nope.json"), &schema());
        assert!(matches!(result, Err(MulescanError::ReportIO(_))));
    }
}
