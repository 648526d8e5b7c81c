use crate::consts::TOKENS_PER_RATE_UNIT;

use super::multiplier::GlobalMultiplier;
use super::types::PricingEntry;

/// Token counts and costs for one prompt/completion exchange
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct CostBreakdown {
    pub(crate) prompt_tokens: usize,
    pub(crate) completion_tokens: usize,
    pub(crate) total_tokens: usize,
    pub(crate) prompt_cost: f64,
    pub(crate) completion_cost: f64,
    pub(crate) total_cost: f64,
}

/// Price a pair of token counts.
///
/// An unpriced model (`entry == None`) costs exactly zero while the token
/// counts are still reported. Each component is `tokens * rate * multiplier / 1000`
/// and the total is their plain sum.
pub(crate) fn compute_cost(
    prompt_tokens: usize,
    completion_tokens: usize,
    entry: Option<&PricingEntry>,
    multiplier: GlobalMultiplier,
) -> CostBreakdown {
    let (prompt_cost, completion_cost) = match entry {
        Some(entry) => (
            component_cost(prompt_tokens, entry.prompt_rate_per_k, multiplier),
            component_cost(completion_tokens, entry.completion_rate_per_k, multiplier),
        ),
        None => (0.0, 0.0),
    };

    CostBreakdown {
        prompt_tokens,
        completion_tokens,
        total_tokens: prompt_tokens + completion_tokens,
        prompt_cost,
        completion_cost,
        total_cost: prompt_cost + completion_cost,
    }
}

fn component_cost(tokens: usize, rate_per_k: f64, multiplier: GlobalMultiplier) -> f64 {
    tokens as f64 * rate_per_k * multiplier.value() / TOKENS_PER_RATE_UNIT
}
