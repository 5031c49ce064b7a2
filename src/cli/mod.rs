//! CLI Module
//!
//! Command-line interface for the medallion data lake.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::LakeConfig;
use crate::error::Result;

/// Medallion - layered data lake (raw, trusted, refined)
#[derive(Parser, Debug)]
#[command(name = "medallion")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Lake root directory
    #[arg(long, global = true, conflicts_with = "config")]
    pub root: Option<PathBuf>,

    /// JSON config file describing the lake
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Lake settings from `--config`, else `--root`, else the current directory.
    pub fn lake_config(&self) -> Result<LakeConfig> {
        let config = match (&self.config, &self.root) {
            (Some(path), _) => LakeConfig::from_file(path)?,
            (None, Some(root)) => LakeConfig::new(root),
            (None, None) => LakeConfig::new("."),
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a JSON or CSV file as layer data
    #[command(name = "put")]
    Put {
        /// Target layer: raw, trusted or refined
        #[arg(short, long)]
        layer: String,

        /// Project the data belongs to
        #[arg(short, long)]
        project: String,

        /// Storage format: csv, parquet or json
        #[arg(short, long)]
        format: String,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Extra key-value data as a JSON object
        #[arg(long)]
        extra_info: Option<String>,

        /// Upstream id (repeatable; ignored for raw)
        #[arg(long = "source-id")]
        source_ids: Vec<String>,

        /// Input file (.csv or .parquet for tables, JSON otherwise)
        file: PathBuf,
    },

    /// Print stored content
    #[command(name = "get")]
    Get {
        /// Id assigned at save time
        id: String,
    },

    /// Print a metadata record
    #[command(name = "metadata")]
    Metadata {
        /// Id assigned at save time
        id: String,
    },
}
