use std::io::Read;
use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use crate::cli::InputArgs;
use crate::core::Estimator;
use crate::error::AppError;
use crate::output::{error_json, models_json, print_models_table, response_json};
use crate::tokenizer::Tokenizer;

pub(crate) struct CommandContext<'a, T> {
    pub(crate) estimator: &'a Estimator<T>,
    pub(crate) pretty: bool,
}

/// Read raw payload bytes from `path`, or from stdin when `path` is `None`.
/// Decoding is left to the JSON parser.
fn read_input(path: Option<&Path>) -> Result<Vec<u8>, AppError> {
    match path {
        Some(path) => {
            std::fs::read(path).map_err(|e| AppError::io(path.display().to_string(), e))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| AppError::io("stdin", e))?;
            Ok(buf)
        }
    }
}

/// Estimate a single payload. Returns `false` when the payload was rejected.
pub(crate) fn handle_estimate<T: Tokenizer>(
    args: &InputArgs,
    ctx: &CommandContext<'_, T>,
) -> Result<bool, AppError> {
    let body = match &args.payload {
        Some(payload) => payload.as_bytes().to_vec(),
        None => read_input(args.input.as_deref())?,
    };

    match ctx.estimator.handle(&body) {
        Ok(response) => {
            println!("{}", response_json(&response, ctx.pretty));
            Ok(true)
        }
        Err(e) => {
            println!("{}", error_json(&e, ctx.pretty));
            Ok(false)
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub(crate) requests: usize,
    pub(crate) rejected: usize,
    pub(crate) degraded: usize,
}

/// Estimate every non-blank line independently; output keeps input order.
/// A line that is not valid UTF-8 is rejected on its own.
pub(crate) fn run_batch<T: Tokenizer>(
    estimator: &Estimator<T>,
    content: &[u8],
) -> (Vec<String>, BatchSummary) {
    let lines: Vec<&[u8]> = content
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.trim_ascii().is_empty())
        .collect();

    let results: Vec<(String, bool, bool)> = lines
        .into_par_iter()
        .map(|line| match estimator.handle_detailed(line) {
            Ok(estimate) => (
                response_json(&estimate.response, false),
                false,
                estimate.is_degraded(),
            ),
            Err(e) => (error_json(&e, false), true, false),
        })
        .collect();

    let summary = BatchSummary {
        requests: results.len(),
        rejected: results.iter().filter(|(_, rejected, _)| *rejected).count(),
        degraded: results.iter().filter(|(_, _, degraded)| *degraded).count(),
    };
    let rendered = results.into_iter().map(|(json, _, _)| json).collect();
    (rendered, summary)
}

pub(crate) fn handle_batch<T: Tokenizer>(
    input: Option<&Path>,
    ctx: &CommandContext<'_, T>,
) -> Result<BatchSummary, AppError> {
    let content = read_input(input)?;
    let (rendered, summary) = run_batch(ctx.estimator, &content);
    for line in rendered {
        println!("{line}");
    }
    debug!(
        requests = summary.requests,
        rejected = summary.rejected,
        degraded = summary.degraded,
        "batch finished"
    );
    Ok(summary)
}

pub(crate) fn handle_models<T: Tokenizer>(json: bool, ctx: &CommandContext<'_, T>) {
    let table = ctx.estimator.pricing();
    let multiplier = ctx.estimator.multiplier();
    if json {
        println!("{}", models_json(table, multiplier, ctx.pretty));
    } else {
        print_models_table(table, multiplier);
    }
}
