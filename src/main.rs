// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

mod anonymizer;
mod batch;
mod cmd;
mod config;
mod export;
mod generator;
mod pipeline;
mod source;

use clap::Parser;
use cmd::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = cmd::run(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
