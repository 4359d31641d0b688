//! Configuration types for the export.
//!
//! The JSON config file names, per table, which columns get replaced and
//! with which generator kind:
//!
//! ```json
//! {
//!   "output_format": "csv",
//!   "tables": [
//!     {"name": "users", "columns": [{"name": "email", "type": "email"}]}
//!   ]
//! }
//! ```
//!
//! Tables without an entry are exported as-is, not skipped.

use crate::generator::GeneratorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Output file format for exported tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Sql,
}

impl OutputFormat {
    /// File extension used for `<table>_desensitized.<ext>`
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Sql => "sql",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "sql" => Ok(OutputFormat::Sql),
            _ => anyhow::bail!("Unknown output format: {}. Use: csv, sql", s),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Top-level export configuration, loaded once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format for all tables
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Per-table anonymization rules
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// Anonymization rules for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name (unique within the configuration)
    pub name: String,
    /// Columns to replace
    pub columns: Vec<ColumnConfig>,
}

/// One column to replace and the generator kind to replace it with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column name (unique within the table)
    pub name: String,
    /// Generator kind tag; unknown tags leave the column untouched
    #[serde(rename = "type")]
    pub kind: String,
}

impl ColumnConfig {
    /// Parsed generator kind, or None for unrecognized tags
    pub fn generator_kind(&self) -> Option<GeneratorKind> {
        GeneratorKind::parse(&self.kind)
    }
}

impl ExportConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {:?}: {}", path, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {:?}: {}", path, e))?;
        Ok(config)
    }

    /// Linear lookup by table name
    pub fn find_table(&self, table_name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|t| t.name == table_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (i, table) in self.tables.iter().enumerate() {
            if table.name.is_empty() {
                anyhow::bail!("Table entry {} has an empty name", i);
            }
            if self.tables[..i].iter().any(|t| t.name == table.name) {
                anyhow::bail!("Duplicate table entry: {}", table.name);
            }
            for (j, column) in table.columns.iter().enumerate() {
                if column.name.is_empty() {
                    anyhow::bail!("Table {} has a column with an empty name", table.name);
                }
                if table.columns[..j].iter().any(|c| c.name == column.name) {
                    anyhow::bail!(
                        "Duplicate column entry {} in table {}",
                        column.name,
                        table.name
                    );
                }
            }
        }
        Ok(())
    }

    /// Column configs whose generator kind is not recognized.
    ///
    /// These are not errors (the columns pass through unchanged), but the
    /// validate command reports them so typos don't silently leak data.
    pub fn unknown_kinds(&self) -> Vec<(String, String, String)> {
        let mut unknown = Vec::new();
        for table in &self.tables {
            for column in &table.columns {
                if column.generator_kind().is_none() {
                    unknown.push((table.name.clone(), column.name.clone(), column.kind.clone()));
                }
            }
        }
        unknown
    }
}
