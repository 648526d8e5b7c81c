use serde::Deserialize;

/// Model pricing info (USD per 1000 tokens)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct PricingEntry {
    pub(crate) model: String,
    pub(crate) prompt_rate_per_k: f64,
    pub(crate) completion_rate_per_k: f64,
}
