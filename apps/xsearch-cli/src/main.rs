//! XSearch CLI - compose and manage X advanced-search queries

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use xsearch_cli::{execute_command, Cli};
use xsearch_core::{JsonFileStore, QueryBuilder, SearchConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.storage {
        Some(path) => SearchConfig::new(path),
        None => SearchConfig::from_env(),
    };

    let store = Arc::new(JsonFileStore::new(&config.storage_path));
    let mut builder = QueryBuilder::load(store, config).await;

    execute_command(cli.command, &mut builder, &mut std::io::stdout()).await?;
    Ok(())
}
