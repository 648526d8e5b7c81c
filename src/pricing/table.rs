use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::PricingError;

use super::types::PricingEntry;

const BUILTIN_PRICING: &str = include_str!("pricing.toml");

#[derive(Debug, Deserialize)]
struct PricingFile {
    #[serde(default, rename = "model")]
    models: Vec<PricingEntry>,
}

/// Exact-match lookup from model identifier to its rates.
///
/// Built once at startup and only read afterwards. Entries keep the order
/// they had in the source document so listings are stable.
#[derive(Debug, Default)]
pub(crate) struct PricingTable {
    entries: Vec<PricingEntry>,
    index: HashMap<String, usize>,
}

impl PricingTable {
    /// The table compiled into the binary.
    pub(crate) fn builtin() -> Result<Self, PricingError> {
        Self::from_toml_str(BUILTIN_PRICING, "<builtin>")
    }

    /// Load from `path` if given, otherwise use the builtin table.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, PricingError> {
        let table = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin()?,
        };
        debug!(
            models = table.len(),
            origin = %path.map_or_else(|| "<builtin>".into(), |p| p.display().to_string()),
            "pricing table loaded"
        );
        Ok(table)
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self, PricingError> {
        let content = std::fs::read_to_string(path).map_err(|source| PricingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    pub(crate) fn from_toml_str(content: &str, origin: &str) -> Result<Self, PricingError> {
        let file: PricingFile = toml::from_str(content).map_err(|source| PricingError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_entries(file.models)
    }

    pub(crate) fn from_entries(entries: Vec<PricingEntry>) -> Result<Self, PricingError> {
        let mut index = HashMap::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            if entry.model.trim().is_empty() {
                return Err(PricingError::EmptyModel);
            }
            check_rate(&entry.model, "prompt_rate_per_k", entry.prompt_rate_per_k)?;
            check_rate(&entry.model, "completion_rate_per_k", entry.completion_rate_per_k)?;
            if index.insert(entry.model.clone(), i).is_some() {
                return Err(PricingError::DuplicateModel {
                    model: entry.model.clone(),
                });
            }
        }

        Ok(Self { entries, index })
    }

    /// `None` means the model is unpriced, which is not an error.
    pub(crate) fn rate_for(&self, model: &str) -> Option<&PricingEntry> {
        self.index.get(model).map(|&i| &self.entries[i])
    }

    pub(crate) fn entries(&self) -> &[PricingEntry] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

fn check_rate(model: &str, field: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidRate {
            model: model.to_string(),
            field,
            value,
        })
    }
}
