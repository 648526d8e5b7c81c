mod calculator;
mod multiplier;
mod table;
mod types;

pub(crate) use calculator::{CostBreakdown, compute_cost};
pub(crate) use multiplier::GlobalMultiplier;
pub(crate) use table::PricingTable;
pub(crate) use types::PricingEntry;
