mod export;

use crate::config::ExportConfig;
use crate::generator::GeneratorKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "db-desensitizer")]
#[command(version)]
#[command(about = "Export a MySQL database with sensitive columns replaced by fake data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Source database connection settings, from flags or environment
#[derive(Args, Debug)]
pub struct ConnectionOpts {
    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: String,

    /// Database host (host or host:port)
    #[arg(long, env = "DB_HOST")]
    pub db_host: String,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: String,
}

impl ConnectionOpts {
    /// Connection URL for the source database
    pub fn url(&self) -> String {
        format!(
            "mysql://{}:{}@{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_name
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export all tables, anonymizing configured columns
    Export {
        /// JSON configuration file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Parent directory for the output; a directory named after the
        /// database is created inside it
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Output format: csv or sql (overrides the config file)
        #[arg(short, long)]
        format: Option<String>,

        /// Rows fetched per page
        #[arg(long, default_value_t = crate::pipeline::DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Random seed for reproducible fake data
        #[arg(long)]
        seed: Option<u64>,

        /// Show progress during export
        #[arg(short, long)]
        progress: bool,

        /// Output statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        connection: ConnectionOpts,
    },

    /// Validate a configuration file
    Validate {
        /// JSON configuration file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },

    /// List supported generator kinds
    Generators,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Export {
            config,
            output,
            format,
            page_size,
            seed,
            progress,
            json,
            connection,
        } => {
            export::run(
                config, output, format, page_size, seed, progress, json, connection,
            )
            .await
        }
        Commands::Validate { config } => run_validate(config),
        Commands::Generators => {
            for kind in GeneratorKind::all() {
                println!("{}", kind.tag());
            }
            Ok(())
        }
    }
}

fn run_validate(path: PathBuf) -> anyhow::Result<()> {
    let config = ExportConfig::load(&path)?;
    config.validate()?;

    let unknown = config.unknown_kinds();
    for (table, column, kind) in &unknown {
        eprintln!(
            "Warning: unknown generator kind '{}' for {}.{} (column will pass through unchanged)",
            kind, table, column
        );
    }

    println!(
        "Configuration is valid: {} tables, format {}",
        config.tables.len(),
        config.output_format
    );
    Ok(())
}
