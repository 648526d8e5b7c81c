use tracing::{debug, warn};

use crate::error::AppError;
use crate::pricing::{GlobalMultiplier, PricingTable, compute_cost};
use crate::tokenizer::Tokenizer;

use super::types::{Degradation, Estimate, UsageRequest, UsageResponse};

/// Runs the parse → encode → price pipeline for one request at a time.
///
/// Holds only read-only state, so one instance can serve any number of
/// concurrent requests by shared reference.
pub(crate) struct Estimator<T> {
    tokenizer: T,
    pricing: PricingTable,
    multiplier: GlobalMultiplier,
}

impl<T: Tokenizer> Estimator<T> {
    pub(crate) fn new(tokenizer: T, pricing: PricingTable, multiplier: GlobalMultiplier) -> Self {
        Self {
            tokenizer,
            pricing,
            multiplier,
        }
    }

    pub(crate) fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub(crate) fn multiplier(&self) -> GlobalMultiplier {
        self.multiplier
    }

    /// Parse a raw payload and estimate it. Only an unparsable payload fails,
    /// including one that is not valid UTF-8.
    pub(crate) fn handle(&self, body: &[u8]) -> Result<UsageResponse, AppError> {
        self.handle_detailed(body).map(|estimate| estimate.response)
    }

    /// Like [`Estimator::handle`], keeping the degradation details.
    pub(crate) fn handle_detailed(&self, body: &[u8]) -> Result<Estimate, AppError> {
        let request: UsageRequest = serde_json::from_slice(body)?;
        Ok(self.estimate(&request))
    }

    pub(crate) fn estimate(&self, request: &UsageRequest) -> Estimate {
        let model = request.model.as_str();
        let mut degradations = Vec::new();

        let prompt_tokens = self.count_field(model, "prompt", &request.prompt).unwrap_or_else(|| {
            degradations.push(Degradation::PromptEncoding);
            0
        });
        let completion_tokens = self
            .count_field(model, "completion", &request.completion)
            .unwrap_or_else(|| {
                degradations.push(Degradation::CompletionEncoding);
                0
            });

        let entry = self.pricing.rate_for(model);
        if entry.is_none() {
            warn!(model, "model not supported by pricing table, cost is zero");
            degradations.push(Degradation::UnpricedModel);
        }

        let breakdown = compute_cost(prompt_tokens, completion_tokens, entry, self.multiplier);
        debug!(
            model,
            prompt_tokens,
            completion_tokens,
            total_cost = breakdown.total_cost,
            degraded = !degradations.is_empty(),
            "estimate computed"
        );

        Estimate {
            response: breakdown.into(),
            degradations,
        }
    }

    fn count_field(&self, model: &str, field: &'static str, text: &str) -> Option<usize> {
        match self.tokenizer.count(model, text) {
            Ok(n) => Some(n),
            Err(e) => {
                warn!(model, field, error = %e, "tokenization failed, counting zero tokens");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingEntry;
    use crate::tokenizer::testing::WordTokenizer;

    fn table() -> PricingTable {
        PricingTable::from_entries(vec![
            PricingEntry {
                model: "gpt-4".to_string(),
                prompt_rate_per_k: 0.03,
                completion_rate_per_k: 0.06,
            },
            PricingEntry {
                model: "priced-only".to_string(),
                prompt_rate_per_k: 1.0,
                completion_rate_per_k: 1.0,
            },
        ])
        .unwrap()
    }

    fn estimator(multiplier: f64) -> Estimator<WordTokenizer> {
        Estimator::new(
            WordTokenizer::new(&["gpt-4", "encoded-only"]),
            table(),
            GlobalMultiplier::new(multiplier).unwrap(),
        )
    }

    fn request(prompt: &str, completion: &str, model: &str) -> UsageRequest {
        UsageRequest {
            prompt: prompt.to_string(),
            completion: completion.to_string(),
            model: model.to_string(),
        }
    }

    fn words(n: usize) -> String {
        vec!["w"; n].join(" ")
    }

    #[test]
    fn full_estimate() {
        let est = estimator(1.0).estimate(&request(&words(10), &words(5), "gpt-4"));
        assert!(!est.is_degraded());
        let r = est.response;
        assert_eq!(r.usage.prompt_tokens, 10);
        assert_eq!(r.usage.completion_tokens, 5);
        assert_eq!(r.usage.total_tokens, 15);
        assert!((r.cost.prompt_cost - 0.0003).abs() < 1e-12);
        assert!((r.cost.completion_cost - 0.0003).abs() < 1e-12);
        assert!((r.cost.total_cost - 0.0006).abs() < 1e-12);
    }

    #[test]
    fn unpriced_model_keeps_token_counts() {
        let est = estimator(1.0).estimate(&request("a b c", "d e", "encoded-only"));
        assert_eq!(est.degradations, vec![Degradation::UnpricedModel]);
        assert_eq!(est.response.usage.total_tokens, 5);
        assert_eq!(est.response.cost.prompt_cost, 0.0);
        assert_eq!(est.response.cost.completion_cost, 0.0);
        assert_eq!(est.response.cost.total_cost, 0.0);
    }

    #[test]
    fn unknown_model_degrades_everything() {
        let est = estimator(1.0).estimate(&request("a b c", "d e", "unknown-model-x"));
        assert_eq!(
            est.degradations,
            vec![
                Degradation::PromptEncoding,
                Degradation::CompletionEncoding,
                Degradation::UnpricedModel
            ]
        );
        assert_eq!(est.response.usage.prompt_tokens, 0);
        assert_eq!(est.response.usage.completion_tokens, 0);
        assert_eq!(est.response.usage.total_tokens, 0);
        assert_eq!(est.response.cost.total_cost, 0.0);
    }

    #[test]
    fn priced_but_unencodable_model_costs_zero_tokens() {
        let est = estimator(1.0).estimate(&request("a b", "c", "priced-only"));
        assert_eq!(
            est.degradations,
            vec![Degradation::PromptEncoding, Degradation::CompletionEncoding]
        );
        assert_eq!(est.response.usage.total_tokens, 0);
        assert_eq!(est.response.cost.total_cost, 0.0);
    }

    #[test]
    fn empty_strings_are_zero() {
        let est = estimator(1.0).estimate(&request("", "", "gpt-4"));
        assert!(!est.is_degraded());
        assert_eq!(est.response.usage.total_tokens, 0);
        assert_eq!(est.response.cost.total_cost, 0.0);
    }

    #[test]
    fn handle_parses_payload() {
        let resp = estimator(1.0)
            .handle(br#"{"prompt":"one two","completion":"three","model":"gpt-4","extra":true}"#)
            .unwrap();
        assert_eq!(resp.usage.prompt_tokens, 2);
        assert_eq!(resp.usage.completion_tokens, 1);
    }

    #[test]
    fn handle_rejects_malformed_payload() {
        let est = estimator(1.0);
        for body in ["not json", "", "[]", r#"{"prompt":"x","model":"gpt-4"}"#] {
            let err = est.handle(body.as_bytes()).unwrap_err();
            assert!(matches!(err, AppError::MalformedPayload(_)), "{body}");
        }
    }

    #[test]
    fn handle_rejects_invalid_utf8() {
        let est = estimator(1.0);
        for body in [
            &b"{\"prompt\":\"\xff\",\"completion\":\"\",\"model\":\"gpt-4\"}"[..],
            &b"\xff\xfe garbage"[..],
        ] {
            let err = est.handle(body).unwrap_err();
            assert!(matches!(err, AppError::MalformedPayload(_)));
        }
    }

    #[test]
    fn handle_is_idempotent() {
        let est = estimator(1.7);
        let body = br#"{"prompt":"a b c d","completion":"e f g","model":"gpt-4"}"#;
        let first = serde_json::to_string(&est.handle(body).unwrap()).unwrap();
        let second = serde_json::to_string(&est.handle(body).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn multiplier_scales_linearly() {
        let req = request(&words(123), &words(45), "gpt-4");
        let base = estimator(1.0).estimate(&req).response.cost;
        let doubled = estimator(2.0).estimate(&req).response.cost;
        assert!((doubled.prompt_cost - 2.0 * base.prompt_cost).abs() <= 1e-9 * base.prompt_cost);
        assert!(
            (doubled.completion_cost - 2.0 * base.completion_cost).abs()
                <= 1e-9 * base.completion_cost
        );
    }

    #[test]
    fn estimator_is_shareable_across_threads() {
        let est = estimator(1.0);
        let totals: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (1..=4)
                .map(|n| {
                    let est = &est;
                    s.spawn(move || {
                        est.estimate(&request(&words(n), &words(n), "gpt-4"))
                            .response
                            .usage
                            .total_tokens
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(totals, vec![2, 4, 6, 8]);
    }
}
