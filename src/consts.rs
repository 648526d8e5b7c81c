/// Environment variable holding the global pricing multiplier
pub(crate) const BASE_RATIO_ENV: &str = "BASE_RATIO";

/// Environment variable holding the tracing filter directive
pub(crate) const LOG_ENV: &str = "TOKCOST_LOG";

/// Multiplier used when no valid value is configured
pub(crate) const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Rates in the pricing table are quoted per this many tokens
pub(crate) const TOKENS_PER_RATE_UNIT: f64 = 1000.0;
