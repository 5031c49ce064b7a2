//! Medallion CLI - Layered Data Lake
//!
//! Command-line interface over the local lake.

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use medallion::cli::commands::{self, PutArgs};
use medallion::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    info!("Medallion v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.lake_config().context("failed to load lake configuration")?;
    let data_repository = config.data_repository();
    let metadata_repository = config.metadata_repository();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Put {
            layer,
            project,
            format,
            author,
            description,
            extra_info,
            source_ids,
            file,
        } => {
            let args = PutArgs {
                layer,
                project,
                format,
                author,
                description,
                extra_info,
                source_ids,
                file,
            };
            commands::put(&args, &data_repository, &metadata_repository, &mut stdout)
                .with_context(|| format!("failed to store {}", args.file.display()))?;
        }
        Commands::Get { id } => {
            commands::get(&id, &data_repository, &metadata_repository, &mut stdout)
                .with_context(|| format!("failed to read {}", id))?;
        }
        Commands::Metadata { id } => {
            commands::metadata(&id, &metadata_repository, &mut stdout)
                .with_context(|| format!("failed to read metadata for {}", id))?;
        }
    }

    Ok(())
}
