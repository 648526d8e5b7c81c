//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

use super::commands::Commands;

#[derive(Parser)]
#[command(name = "tokcost")]
#[command(about = "Token usage and cost estimate for an LLM prompt/completion pair", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Global pricing multiplier (overrides BASE_RATIO and the config file)
    #[arg(long, global = true, value_name = "RATIO")]
    pub(crate) base_ratio: Option<String>,

    /// Pricing table TOML file replacing the builtin table
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) pricing: Option<PathBuf>,

    /// Config file (default: ~/.config/tokcost/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub(crate) pretty: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.pretty && config.pretty {
            self.pretty = true;
        }
        if self.pricing.is_none() {
            self.pricing = config.pricing.clone();
        }
        self
    }
}
