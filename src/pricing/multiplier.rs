use std::fmt;

use tracing::{debug, warn};

use crate::consts::DEFAULT_MULTIPLIER;

/// Where the effective multiplier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MultiplierSource {
    Cli,
    Env,
    Config,
    Default,
}

impl fmt::Display for MultiplierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MultiplierSource::Cli => "--base-ratio",
            MultiplierSource::Env => "BASE_RATIO",
            MultiplierSource::Config => "config file",
            MultiplierSource::Default => "default",
        })
    }
}

/// Scalar applied uniformly to every rate. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GlobalMultiplier(f64);

impl Default for GlobalMultiplier {
    fn default() -> Self {
        GlobalMultiplier(DEFAULT_MULTIPLIER)
    }
}

impl GlobalMultiplier {
    /// Returns `None` for negative or non-finite values.
    pub(crate) fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(GlobalMultiplier(value))
    }

    /// Parse a raw setting. Absent, empty, or unparsable input yields the default.
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        match raw.parse::<f64>().ok().and_then(Self::new) {
            Some(m) => m,
            None => {
                warn!(value = raw, "invalid pricing multiplier, using {DEFAULT_MULTIPLIER}");
                Self::default()
            }
        }
    }

    /// Pick the first configured source: CLI flag, then environment, then
    /// config file. Only the winning source is parsed.
    pub(crate) fn resolve(
        cli: Option<&str>,
        env: Option<&str>,
        config: Option<&str>,
    ) -> (Self, MultiplierSource) {
        let (multiplier, source) = if let Some(raw) = cli {
            (Self::parse(Some(raw)), MultiplierSource::Cli)
        } else if let Some(raw) = env {
            (Self::parse(Some(raw)), MultiplierSource::Env)
        } else if let Some(raw) = config {
            (Self::parse(Some(raw)), MultiplierSource::Config)
        } else {
            (Self::default(), MultiplierSource::Default)
        };
        debug!(multiplier = multiplier.0, %source, "pricing multiplier resolved");
        (multiplier, source)
    }

    pub(crate) fn value(self) -> f64 {
        self.0
    }
}
