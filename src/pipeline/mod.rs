//! Export pipeline: paginated read, anonymize, append-on-write.
//!
//! Strictly sequential: one page is read, transformed, and written before
//! the next page is requested, and tables are processed one at a time.
//! Any read or write error aborts the whole run.

use crate::anonymizer::Anonymizer;
use crate::config::{ExportConfig, OutputFormat};
use crate::export;
use crate::source::TableSource;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_PAGE_SIZE: usize = 5000;

/// Runtime options for one export run
#[derive(Debug)]
pub struct ExportOptions {
    /// Directory the per-table files are written into
    pub output_dir: PathBuf,
    /// Output format for all tables
    pub format: OutputFormat,
    /// Rows fetched per page
    pub page_size: usize,
    /// RNG seed for reproducible fake data
    pub seed: Option<u64>,
    /// Show a per-table progress spinner
    pub progress: bool,
}

/// Statistics from one export run
#[derive(Debug, Default, serde::Serialize)]
pub struct ExportStats {
    /// Tables that produced an output file
    pub tables_exported: usize,
    /// Total rows written across all tables
    pub rows_exported: u64,
    /// Total cell values replaced with fake data
    pub cells_replaced: u64,
    /// Per-table statistics, in processing order
    pub table_stats: Vec<TableExportStats>,
}

/// Per-table export statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct TableExportStats {
    pub name: String,
    pub rows: u64,
    pub batches: u64,
}

/// Export every table from the source, anonymizing configured columns.
///
/// Table order is whatever [`TableSource::list_tables`] returns. Empty
/// tables produce no output file, since the first-batch write never
/// happens.
pub async fn run_export<S: TableSource + Sync>(
    source: &S,
    config: &ExportConfig,
    options: &ExportOptions,
) -> anyhow::Result<ExportStats> {
    let tables = source.list_tables().await?;
    info!("Exporting {} tables to {:?}", tables.len(), options.output_dir);

    let mut anonymizer = Anonymizer::new(config, options.seed);
    let mut stats = ExportStats::default();

    for table_name in &tables {
        let rows = export_table(source, config, options, &mut anonymizer, table_name).await?;

        let batches = rows.div_ceil(options.page_size as u64);
        if rows > 0 {
            stats.tables_exported += 1;
        }
        stats.rows_exported += rows;
        stats.table_stats.push(TableExportStats {
            name: table_name.clone(),
            rows,
            batches,
        });
    }

    stats.cells_replaced = anonymizer.cells_replaced();
    info!(
        "Export complete: {} tables, {} rows",
        stats.tables_exported, stats.rows_exported
    );
    Ok(stats)
}

/// Drive one table from offset 0 until an empty page is returned.
async fn export_table<S: TableSource + Sync>(
    source: &S,
    config: &ExportConfig,
    options: &ExportOptions,
    anonymizer: &mut Anonymizer<'_>,
    table_name: &str,
) -> anyhow::Result<u64> {
    if config.find_table(table_name).is_some() {
        info!("Processing table {} (anonymized)", table_name);
    } else {
        info!("Processing table {} (pass-through)", table_name);
    }

    let bar = table_progress(table_name, options.progress);
    let path = export::output_path(&options.output_dir, table_name, options.format);

    let mut offset: u64 = 0;
    let mut rows_written: u64 = 0;

    loop {
        let batch = source
            .read_page(table_name, options.page_size, offset)
            .await?;
        if batch.is_empty() {
            debug!("Table {} exhausted at offset {}", table_name, offset);
            break;
        }

        let batch = anonymizer.anonymize(batch, table_name);

        let first_batch = offset == 0;
        // The CREATE statement is only needed at the head of a SQL dump
        let create_sql = if first_batch && options.format == OutputFormat::Sql {
            Some(source.create_table_sql(table_name).await?)
        } else {
            None
        };

        export::write_batch(
            &batch,
            table_name,
            &path,
            first_batch,
            options.format,
            create_sql.as_deref(),
        )?;

        rows_written += batch.len() as u64;
        bar.inc(batch.len() as u64);
        offset += options.page_size as u64;
    }

    bar.finish_and_clear();
    Ok(rows_written)
}

fn table_progress(table_name: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}: {pos} rows")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(table_name.to_string());
    bar
}
