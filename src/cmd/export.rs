//! CLI handler for the export command.

use super::ConnectionOpts;
use crate::config::{ExportConfig, OutputFormat};
use crate::pipeline::{run_export, ExportOptions, ExportStats};
use crate::source::MySqlSource;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    config_path: PathBuf,
    output: PathBuf,
    format: Option<String>,
    page_size: usize,
    seed: Option<u64>,
    progress: bool,
    json: bool,
    connection: ConnectionOpts,
) -> anyhow::Result<()> {
    if page_size == 0 {
        anyhow::bail!("Page size must be greater than zero");
    }

    let config = ExportConfig::load(&config_path)?;
    config.validate()?;

    // CLI flag wins over the config file
    let format = match format {
        Some(f) => OutputFormat::from_str(&f)?,
        None => config.output_format,
    };

    // One directory named after the source database
    let output_dir = output.join(&connection.db_name);
    std::fs::create_dir_all(&output_dir)?;

    let source = MySqlSource::connect(&connection.url(), &connection.db_name)?;
    info!(
        "Connected to {} on {} as {}",
        connection.db_name, connection.db_host, connection.db_user
    );

    let options = ExportOptions {
        output_dir,
        format,
        page_size,
        seed,
        progress,
    };

    let result = run_export(&source, &config, &options).await;
    source.disconnect().await?;
    let stats = result?;

    output_stats(&stats, json);
    Ok(())
}

fn output_stats(stats: &ExportStats, json: bool) {
    if json {
        match serde_json::to_string_pretty(stats) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to serialize stats: {}", e),
        }
    } else {
        println!("\nExport complete:");
        println!("  Tables exported: {}", stats.tables_exported);
        println!("  Rows exported: {}", stats.rows_exported);
        println!("  Values replaced: {}", stats.cells_replaced);
        for table in &stats.table_stats {
            println!(
                "    {}: {} rows in {} batches",
                table.name, table.rows, table.batches
            );
        }
    }
}
