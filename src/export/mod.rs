//! Export writers for CSV and SQL dump output.
//!
//! Each table gets one file, created (truncated) on its first batch and
//! appended to on every later batch. The file handle is opened and closed
//! per batch; there is no partial-write recovery, so re-running an export
//! regenerates each table's file from scratch.

use crate::batch::{RowBatch, Value};
use crate::config::OutputFormat;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;

/// Append one batch to the table's output file.
///
/// `create_sql` is only consulted for the first SQL batch; CSV ignores it.
pub fn write_batch(
    batch: &RowBatch,
    table_name: &str,
    path: &Path,
    first_batch: bool,
    format: OutputFormat,
    create_sql: Option<&str>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => write_csv_batch(batch, path, first_batch),
        OutputFormat::Sql => write_sql_batch(batch, table_name, path, first_batch, create_sql),
    }
}

/// Output path for a table: `<dir>/<table>_desensitized.<ext>`
pub fn output_path(dir: &Path, table_name: &str, format: OutputFormat) -> std::path::PathBuf {
    dir.join(format!("{}_desensitized.{}", table_name, format.extension()))
}

fn open_output(path: &Path, first_batch: bool) -> std::io::Result<BufWriter<File>> {
    let file = if first_batch {
        File::create(path)?
    } else {
        OpenOptions::new().append(true).open(path)?
    };
    Ok(BufWriter::with_capacity(WRITER_BUFFER_SIZE, file))
}

fn write_csv_batch(batch: &RowBatch, path: &Path, first_batch: bool) -> anyhow::Result<()> {
    let out = open_output(path, first_batch)?;
    let mut writer = csv::Writer::from_writer(out);

    if first_batch {
        writer.write_record(&batch.columns)?;
    }
    for row in &batch.rows {
        writer.write_record(row.iter().map(csv_field))?;
    }
    writer.flush()?;
    Ok(())
}

/// CSV field rendering: NULL and NaN become empty fields.
fn csv_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Float(f) if f.is_nan() => String::new(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => s.clone(),
    }
}

fn write_sql_batch(
    batch: &RowBatch,
    table_name: &str,
    path: &Path,
    first_batch: bool,
    create_sql: Option<&str>,
) -> anyhow::Result<()> {
    let mut out = open_output(path, first_batch)?;

    if first_batch {
        let create_sql = create_sql
            .ok_or_else(|| anyhow::anyhow!("Missing CREATE TABLE statement for {}", table_name))?;
        writeln!(out, "{};", create_sql)?;
        writeln!(out)?;
    }

    for row in &batch.rows {
        let fields: Vec<String> = row.iter().map(sql_literal).collect();
        writeln!(out, "INSERT INTO {} VALUES ({});", table_name, fields.join(","))?;
    }

    out.flush()?;
    Ok(())
}

/// SQL literal rendering: everything is a quoted string except NULL and
/// float NaN, which render as unquoted NULL.
fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Float(f) if f.is_nan() => "NULL".to_string(),
        Value::Float(f) => quote(&f.to_string()),
        Value::Text(s) => quote(s),
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "''"))
}
