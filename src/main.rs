mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod pricing;
mod tokenizer;

use std::env::VarError;
use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::{CommandContext, handle_batch, handle_estimate, handle_models};
use cli::{Cli, Commands, InputArgs};
use config::Config;
use consts::{BASE_RATIO_ENV, LOG_ENV};
use crate::core::Estimator;
use error::AppError;
use pricing::{GlobalMultiplier, PricingTable};
use tokenizer::TiktokenTokenizer;

/// Logs go to stderr so stdout carries only response bodies.
fn init_tracing(debug: bool) {
    let default = if debug { "tokcost=debug" } else { "tokcost=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// A set but non-Unicode value still counts as present and resolves as unparsable.
fn setting_from_var(var: Result<String, VarError>) -> Option<String> {
    match var {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}

fn run(cli: Cli) -> Result<bool, AppError> {
    let config = Config::load(cli.config.as_deref());
    let cli = cli.with_config(&config);

    let env_ratio = setting_from_var(std::env::var(BASE_RATIO_ENV));
    let config_ratio = config.base_ratio();
    let (multiplier, _) = GlobalMultiplier::resolve(
        cli.base_ratio.as_deref(),
        env_ratio.as_deref(),
        config_ratio.as_deref(),
    );
    let pricing = PricingTable::load(cli.pricing.as_deref())?;

    let estimator = Estimator::new(TiktokenTokenizer::new(), pricing, multiplier);
    let ctx = CommandContext {
        estimator: &estimator,
        pretty: cli.pretty,
    };

    match cli.command {
        Some(Commands::Models { json }) => {
            handle_models(json, &ctx);
            Ok(true)
        }
        Some(Commands::Batch { input }) => handle_batch(input.as_deref(), &ctx).map(|_| true),
        Some(Commands::Estimate(args)) => handle_estimate(&args, &ctx),
        None => handle_estimate(&InputArgs::default(), &ctx),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
