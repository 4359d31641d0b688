//! End-to-end pipeline tests over an in-memory table source.

use async_trait::async_trait;
use db_desensitizer::batch::{RowBatch, Value};
use db_desensitizer::config::{ColumnConfig, ExportConfig, OutputFormat, TableConfig};
use db_desensitizer::pipeline::{run_export, ExportOptions};
use db_desensitizer::source::TableSource;
use tempfile::TempDir;

/// Fixed in-memory tables, paginated the same way the database would be.
struct MemorySource {
    tables: Vec<(String, RowBatch)>,
}

impl MemorySource {
    fn new(tables: Vec<(&str, RowBatch)>) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|(name, batch)| (name.to_string(), batch))
                .collect(),
        }
    }
}

#[async_trait]
impl TableSource for MemorySource {
    async fn list_tables(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.tables.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn read_page(
        &self,
        table: &str,
        page_size: usize,
        offset: u64,
    ) -> anyhow::Result<RowBatch> {
        let (_, all) = self
            .tables
            .iter()
            .find(|(name, _)| name == table)
            .ok_or_else(|| anyhow::anyhow!("No such table: {}", table))?;

        let start = (offset as usize).min(all.rows.len());
        let end = (start + page_size).min(all.rows.len());
        if start == end {
            return Ok(RowBatch::default());
        }
        Ok(RowBatch {
            columns: all.columns.clone(),
            rows: all.rows[start..end].to_vec(),
        })
    }

    async fn create_table_sql(&self, table: &str) -> anyhow::Result<String> {
        Ok(format!("CREATE TABLE IF NOT EXISTS {} (stub int)", table))
    }
}

fn users_rows(count: usize) -> RowBatch {
    let mut batch = RowBatch::new(vec!["id".to_string(), "email".to_string()]);
    for i in 0..count {
        batch.push_row(vec![
            Value::Text(i.to_string()),
            Value::Text(format!("user{}@x.com", i)),
        ]);
    }
    batch
}

fn users_config() -> ExportConfig {
    ExportConfig {
        tables: vec![TableConfig {
            name: "users".to_string(),
            columns: vec![ColumnConfig {
                name: "email".to_string(),
                kind: "email".to_string(),
            }],
        }],
        ..Default::default()
    }
}

fn options(dir: &TempDir, format: OutputFormat, page_size: usize) -> ExportOptions {
    ExportOptions {
        output_dir: dir.path().to_path_buf(),
        format,
        page_size,
        seed: Some(42),
        progress: false,
    }
}

#[tokio::test]
async fn test_rows_preserved_across_page_boundaries() {
    // 25 rows with page size 10 gives pages of 10, 10, 5
    let source = MemorySource::new(vec![("users", users_rows(25))]);
    let config = users_config();
    let dir = TempDir::new().unwrap();

    let stats = run_export(&source, &config, &options(&dir, OutputFormat::Csv, 10))
        .await
        .unwrap();

    assert_eq!(stats.tables_exported, 1);
    assert_eq!(stats.rows_exported, 25);
    assert_eq!(stats.table_stats[0].batches, 3);
    assert_eq!(stats.cells_replaced, 25);

    let path = dir.path().join("users_desensitized.csv");
    let mut reader = csv::Reader::from_path(&path).unwrap();
    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 25, "no rows dropped or duplicated");

    // ids pass through in order; emails are fresh
    for (i, record) in records.iter().enumerate() {
        assert_eq!(&record[0], i.to_string().as_str());
        assert!(record[1].contains('@'));
        assert_ne!(&record[1], format!("user{}@x.com", i).as_str());
    }
}

#[tokio::test]
async fn test_unconfigured_table_exported_verbatim() {
    let mut orders = RowBatch::new(vec!["id".to_string(), "total".to_string()]);
    orders.push_row(vec![Value::Text("1".to_string()), Value::Float(9.5)]);
    let source = MemorySource::new(vec![("orders", orders)]);
    let config = users_config();
    let dir = TempDir::new().unwrap();

    let stats = run_export(&source, &config, &options(&dir, OutputFormat::Csv, 10))
        .await
        .unwrap();

    assert_eq!(stats.cells_replaced, 0);
    let content = std::fs::read_to_string(dir.path().join("orders_desensitized.csv")).unwrap();
    assert_eq!(content, "id,total\n1,9.5\n");
}

#[tokio::test]
async fn test_empty_table_creates_no_file() {
    let source = MemorySource::new(vec![
        ("empty", RowBatch::new(vec!["id".to_string()])),
        ("users", users_rows(2)),
    ]);
    let config = users_config();
    let dir = TempDir::new().unwrap();

    let stats = run_export(&source, &config, &options(&dir, OutputFormat::Csv, 10))
        .await
        .unwrap();

    assert_eq!(stats.tables_exported, 1);
    assert!(!dir.path().join("empty_desensitized.csv").exists());
    assert!(dir.path().join("users_desensitized.csv").exists());

    // Empty table still shows up in the per-table stats
    assert_eq!(stats.table_stats[0].name, "empty");
    assert_eq!(stats.table_stats[0].rows, 0);
}

#[tokio::test]
async fn test_sql_export_structure() {
    let source = MemorySource::new(vec![("users", users_rows(15))]);
    let config = users_config();
    let dir = TempDir::new().unwrap();

    run_export(&source, &config, &options(&dir, OutputFormat::Sql, 10))
        .await
        .unwrap();

    let content = std::fs::read_to_string(dir.path().join("users_desensitized.sql")).unwrap();
    assert_eq!(content.matches("CREATE TABLE IF NOT EXISTS").count(), 1);
    assert_eq!(content.matches("INSERT INTO users VALUES").count(), 15);
    assert!(content.starts_with("CREATE TABLE IF NOT EXISTS users"));
}

#[tokio::test]
async fn test_rerun_regenerates_identical_structure() {
    let source = MemorySource::new(vec![("users", users_rows(12))]);
    let config = users_config();
    let dir = TempDir::new().unwrap();

    let opts = options(&dir, OutputFormat::Sql, 5);
    run_export(&source, &config, &opts).await.unwrap();
    let first = std::fs::read_to_string(dir.path().join("users_desensitized.sql")).unwrap();

    run_export(&source, &config, &opts).await.unwrap();
    let second = std::fs::read_to_string(dir.path().join("users_desensitized.sql")).unwrap();

    assert_eq!(
        first.matches("INSERT INTO").count(),
        second.matches("INSERT INTO").count()
    );
    assert_eq!(second.matches("CREATE TABLE IF NOT EXISTS").count(), 1);
}

#[tokio::test]
async fn test_read_error_aborts_run() {
    struct FailingSource;

    #[async_trait]
    impl TableSource for FailingSource {
        async fn list_tables(&self) -> anyhow::Result<Vec<String>> {
            Ok(vec!["users".to_string()])
        }

        async fn read_page(
            &self,
            _table: &str,
            _page_size: usize,
            _offset: u64,
        ) -> anyhow::Result<RowBatch> {
            anyhow::bail!("connection lost")
        }

        async fn create_table_sql(&self, _table: &str) -> anyhow::Result<String> {
            anyhow::bail!("connection lost")
        }
    }

    let config = ExportConfig::default();
    let dir = TempDir::new().unwrap();

    let result = run_export(&FailingSource, &config, &options(&dir, OutputFormat::Csv, 10)).await;
    assert!(result.is_err());
}
