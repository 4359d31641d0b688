//! Source database access.
//!
//! The pipeline only sees the [`TableSource`] trait: table listing,
//! paginated reads, and DDL for the SQL-dump header. The concrete MySQL
//! implementation lives in [`mysql`].

mod mysql;

pub use mysql::MySqlSource;

use crate::batch::RowBatch;
use async_trait::async_trait;

/// Read-only access to the source database.
#[async_trait]
pub trait TableSource {
    /// Table names to export, in whatever order the store reports them.
    async fn list_tables(&self) -> anyhow::Result<Vec<String>>;

    /// Read one page of rows. An empty batch means the table is exhausted.
    ///
    /// Pagination relies on the store's default row order being stable
    /// across pages; no ORDER BY is imposed. Concurrent writes to the
    /// source during an export can therefore skip or duplicate rows.
    async fn read_page(
        &self,
        table: &str,
        page_size: usize,
        offset: u64,
    ) -> anyhow::Result<RowBatch>;

    /// `CREATE TABLE IF NOT EXISTS` statement for the table, without a
    /// trailing terminator.
    async fn create_table_sql(&self, table: &str) -> anyhow::Result<String>;
}
