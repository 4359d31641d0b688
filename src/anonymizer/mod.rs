//! Column-level anonymization of row batches.
//!
//! Looks up the table's configuration and replaces every configured
//! column value with a fresh generator call, one call per row. Tables
//! without a configuration entry pass through untouched.

use crate::batch::RowBatch;
use crate::config::ExportConfig;
use crate::generator::{Generator, GeneratorKind};
use tracing::debug;

/// Applies per-table column replacement rules to batches
pub struct Anonymizer<'a> {
    config: &'a ExportConfig,
    generator: Generator,
    cells_replaced: u64,
}

impl<'a> Anonymizer<'a> {
    pub fn new(config: &'a ExportConfig, seed: Option<u64>) -> Self {
        Self {
            config,
            generator: Generator::new(seed),
            cells_replaced: 0,
        }
    }

    /// Total cells replaced across all batches so far
    pub fn cells_replaced(&self) -> u64 {
        self.cells_replaced
    }

    /// Replace configured column values in the batch.
    ///
    /// Columns configured but absent from the batch schema are skipped
    /// silently; unknown generator kinds leave the column untouched.
    pub fn anonymize(&mut self, mut batch: RowBatch, table_name: &str) -> RowBatch {
        let Some(table_config) = self.config.find_table(table_name) else {
            return batch;
        };

        // Resolve configured columns against the batch schema up front
        let mut targets: Vec<(usize, GeneratorKind)> = Vec::new();
        for column in &table_config.columns {
            let Some(kind) = column.generator_kind() else {
                debug!(
                    "Unknown generator kind '{}' for {}.{}, leaving column as-is",
                    column.kind, table_name, column.name
                );
                continue;
            };
            match batch.column_index(&column.name) {
                Some(idx) => targets.push((idx, kind)),
                None => {
                    debug!(
                        "Configured column {}.{} not present in result set, skipping",
                        table_name, column.name
                    );
                }
            }
        }

        // One generator call per row per column, never one value broadcast
        for row in &mut batch.rows {
            for &(idx, kind) in &targets {
                row[idx] = self.generator.generate(kind);
                self.cells_replaced += 1;
            }
        }

        batch
    }
}
