//! Core module - the request pipeline and its data types

mod estimator;
mod types;

pub(crate) use estimator::Estimator;
pub(crate) use types::UsageResponse;
