use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Failed to read {what}: {source}")]
    Io {
        what: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Pricing(#[from] PricingError),
}

impl AppError {
    pub(crate) fn io(what: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            what: what.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum PricingError {
    #[error("Failed to parse pricing table {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to read pricing table {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate pricing entry for model \"{model}\"")]
    DuplicateModel { model: String },

    #[error("Pricing entry with empty model identifier")]
    EmptyModel,

    #[error("Invalid {field} for model \"{model}\": {value}")]
    InvalidRate {
        model: String,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TokenizerError {
    #[error("No encoding known for model \"{model}\"")]
    UnsupportedModel { model: String },
}
