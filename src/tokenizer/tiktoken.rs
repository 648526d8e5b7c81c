use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tiktoken_rs::CoreBPE;
use tracing::debug;

use crate::error::TokenizerError;

use super::{TokenId, Tokenizer};

/// BPE encoder backed by `tiktoken-rs`.
///
/// The model → encoding mapping is the one `tiktoken-rs` ships; identifiers it
/// does not recognise are reported as unsupported rather than mapped to a
/// default encoding. Built encoders are kept per model id because building
/// one means decoding the whole rank file.
#[derive(Default)]
pub(crate) struct TiktokenTokenizer {
    encoders: RwLock<HashMap<String, Arc<CoreBPE>>>,
}

impl TiktokenTokenizer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn encoder(&self, model: &str) -> Result<Arc<CoreBPE>, TokenizerError> {
        if let Ok(encoders) = self.encoders.read()
            && let Some(bpe) = encoders.get(model)
        {
            return Ok(Arc::clone(bpe));
        }

        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
            debug!(model, error = %e, "no encoding for model");
            TokenizerError::UnsupportedModel {
                model: model.to_string(),
            }
        })?;
        let bpe = Arc::new(bpe);

        if let Ok(mut encoders) = self.encoders.write() {
            encoders
                .entry(model.to_string())
                .or_insert_with(|| Arc::clone(&bpe));
        }
        Ok(bpe)
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn encode(&self, model: &str, text: &str) -> Result<Vec<TokenId>, TokenizerError> {
        let bpe = self.encoder(model)?;
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(bpe.encode_ordinary(text))
    }
}
