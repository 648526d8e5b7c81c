//! Model-specific text encoding.
//!
//! Adapters return the full id sequence; the pipeline only uses its length.

mod tiktoken;

pub(crate) use tiktoken::TiktokenTokenizer;

use crate::error::TokenizerError;

pub(crate) type TokenId = u32;

/// Encode text with the encoding that belongs to a model identifier.
pub(crate) trait Tokenizer: Send + Sync {
    /// Fails with [`TokenizerError::UnsupportedModel`] when the model has no
    /// known encoding. Empty text encodes to an empty sequence.
    fn encode(&self, model: &str, text: &str) -> Result<Vec<TokenId>, TokenizerError>;

    fn count(&self, model: &str, text: &str) -> Result<usize, TokenizerError> {
        self.encode(model, text).map(|ids| ids.len())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Deterministic tokenizer for tests: one token per whitespace-separated
    /// word, and only for the models it was built with.
    pub(crate) struct WordTokenizer {
        models: Vec<String>,
    }

    impl WordTokenizer {
        pub(crate) fn new(models: &[&str]) -> Self {
            Self {
                models: models.iter().map(|m| m.to_string()).collect(),
            }
        }
    }

    impl Tokenizer for WordTokenizer {
        fn encode(&self, model: &str, text: &str) -> Result<Vec<TokenId>, TokenizerError> {
            if !self.models.iter().any(|m| m == model) {
                return Err(TokenizerError::UnsupportedModel {
                    model: model.to_string(),
                });
            }
            Ok(text
                .split_whitespace()
                .enumerate()
                .map(|(i, _)| i as TokenId)
                .collect())
        }
    }

    #[test]
    fn default_count_is_sequence_length() {
        let tok = WordTokenizer::new(&["m"]);
        assert_eq!(tok.count("m", "a b c").unwrap(), 3);
        assert_eq!(tok.count("m", "").unwrap(), 0);
        assert!(tok.count("other", "a").is_err());
    }
}
