//! Vaultgraph CLI

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vaultgraph::cli::{self, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = cli::load_config(&args).context("Failed to load configuration")?;

    // RUST_LOG wins; otherwise use the configured level. Logs go to stderr so
    // stdout carries only the response.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    log::info!("Vaultgraph v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Vault: {}", config.vault_path.display());

    let output = cli::run(&args, config)
        .await
        .with_context(|| format!("Query failed: {:?}", args.command))?;

    println!("{}", output.trim_end());
    Ok(())
}
