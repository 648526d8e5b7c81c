//! Request and response types for one estimate
//!
//! These mirror the JSON contract exchanged with the gateway.

use serde::{Deserialize, Serialize};

use crate::pricing::CostBreakdown;

/// One prompt/completion pair to price. Extra payload fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct UsageRequest {
    pub(crate) prompt: String,
    pub(crate) completion: String,
    pub(crate) model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct Usage {
    pub(crate) prompt_tokens: usize,
    pub(crate) completion_tokens: usize,
    pub(crate) total_tokens: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct Cost {
    pub(crate) prompt_cost: f64,
    pub(crate) completion_cost: f64,
    pub(crate) total_cost: f64,
}

/// Response body, returned for both full and degraded estimates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct UsageResponse {
    pub(crate) usage: Usage,
    pub(crate) cost: Cost,
}

impl From<CostBreakdown> for UsageResponse {
    fn from(b: CostBreakdown) -> Self {
        UsageResponse {
            usage: Usage {
                prompt_tokens: b.prompt_tokens,
                completion_tokens: b.completion_tokens,
                total_tokens: b.total_tokens,
            },
            cost: Cost {
                prompt_cost: b.prompt_cost,
                completion_cost: b.completion_cost,
                total_cost: b.total_cost,
            },
        }
    }
}

/// Why an estimate carries zeros that a full estimate would not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Degradation {
    /// Prompt could not be encoded; counted as zero tokens
    PromptEncoding,
    /// Completion could not be encoded; counted as zero tokens
    CompletionEncoding,
    /// Model has no pricing entry; cost is zero
    UnpricedModel,
}

/// Outcome of a successfully parsed request
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Estimate {
    pub(crate) response: UsageResponse,
    pub(crate) degradations: Vec<Degradation>,
}

impl Estimate {
    pub(crate) fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}
