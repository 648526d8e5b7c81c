use serde::Serialize;

use crate::core::UsageResponse;
use crate::error::AppError;
use crate::pricing::{GlobalMultiplier, PricingEntry, PricingTable};

use super::format::effective_rate;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    message: String,
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|e| format!(r#"{{"error":{{"type":"internal","message":"{e}"}}}}"#))
}

pub(crate) fn response_json(response: &UsageResponse, pretty: bool) -> String {
    to_json(response, pretty)
}

pub(crate) fn error_json(error: &AppError, pretty: bool) -> String {
    let kind = match error {
        AppError::MalformedPayload(_) => "malformed_payload",
        AppError::Io { .. } => "io",
        AppError::Pricing(_) => "pricing_table",
    };
    to_json(
        &ErrorBody {
            error: ErrorDetail {
                kind,
                message: error.to_string(),
            },
        },
        pretty,
    )
}

fn model_json(entry: &PricingEntry, multiplier: GlobalMultiplier) -> serde_json::Value {
    serde_json::json!({
        "model": entry.model,
        "prompt_rate_per_k": entry.prompt_rate_per_k,
        "completion_rate_per_k": entry.completion_rate_per_k,
        "effective_prompt_rate_per_k": effective_rate(entry.prompt_rate_per_k, multiplier),
        "effective_completion_rate_per_k": effective_rate(entry.completion_rate_per_k, multiplier),
    })
}

pub(crate) fn models_json(table: &PricingTable, multiplier: GlobalMultiplier, pretty: bool) -> String {
    let models: Vec<serde_json::Value> = table
        .entries()
        .iter()
        .map(|entry| model_json(entry, multiplier))
        .collect();
    to_json(
        &serde_json::json!({
            "multiplier": multiplier.value(),
            "models": models,
        }),
        pretty,
    )
}
