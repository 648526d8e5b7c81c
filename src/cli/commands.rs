//! CLI subcommand definitions

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Estimate one request payload (default)
    Estimate(InputArgs),
    /// Estimate a JSON Lines stream, one payload per line
    Batch {
        /// Read payloads from FILE instead of stdin
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// List the pricing table
    Models {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(Debug, Default, Args)]
pub(crate) struct InputArgs {
    /// Read the payload from FILE instead of stdin
    #[arg(short, long, value_name = "FILE", conflicts_with = "payload")]
    pub(crate) input: Option<PathBuf>,

    /// Payload given inline as a JSON string
    #[arg(long, value_name = "JSON")]
    pub(crate) payload: Option<String>,
}
