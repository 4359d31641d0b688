//! Unit tests for configuration loading, lookup, and validation.

use db_desensitizer::config::{ExportConfig, OutputFormat};
use std::io::Write;
use std::str::FromStr;
use tempfile::NamedTempFile;

fn load(json: &str) -> anyhow::Result<ExportConfig> {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    ExportConfig::load(file.path())
}

#[test]
fn test_load_full_config() {
    let config = load(
        r#"{
            "output_format": "sql",
            "tables": [
                {"name": "users", "columns": [
                    {"name": "email", "type": "email"},
                    {"name": "phone", "type": "phone"}
                ]},
                {"name": "orders", "columns": [
                    {"name": "amount", "type": "float"}
                ]}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.output_format, OutputFormat::Sql);
    assert_eq!(config.tables.len(), 2);

    let users = config.find_table("users").unwrap();
    assert_eq!(users.columns.len(), 2);
    assert_eq!(users.columns[0].name, "email");
    assert_eq!(users.columns[0].kind, "email");

    assert!(config.find_table("missing").is_none());
    config.validate().unwrap();
}

#[test]
fn test_output_format_defaults_to_csv() {
    let config = load(r#"{"tables": []}"#).unwrap();
    assert_eq!(config.output_format, OutputFormat::Csv);
}

#[test]
fn test_output_format_from_str() {
    assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
    assert_eq!(OutputFormat::from_str("SQL").unwrap(), OutputFormat::Sql);
    assert!(OutputFormat::from_str("parquet").is_err());
    assert_eq!(OutputFormat::Sql.extension(), "sql");
}

#[test]
fn test_invalid_json_is_an_error() {
    assert!(load("{not json").is_err());
}

#[test]
fn test_duplicate_table_rejected() {
    let config = load(
        r#"{"tables": [
            {"name": "users", "columns": []},
            {"name": "users", "columns": []}
        ]}"#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_duplicate_column_rejected() {
    let config = load(
        r#"{"tables": [
            {"name": "users", "columns": [
                {"name": "email", "type": "email"},
                {"name": "email", "type": "blank"}
            ]}
        ]}"#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_unknown_kind_is_reported_not_rejected() {
    let config = load(
        r#"{"tables": [
            {"name": "users", "columns": [
                {"name": "email", "type": "emial"}
            ]}
        ]}"#,
    )
    .unwrap();

    // Typos validate fine (the column just passes through) but are listed
    config.validate().unwrap();
    let unknown = config.unknown_kinds();
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].0, "users");
    assert_eq!(unknown[0].1, "email");
    assert_eq!(unknown[0].2, "emial");
    assert!(config.tables[0].columns[0].generator_kind().is_none());
}
