mod format;
mod json;
mod table;

pub(crate) use json::{error_json, models_json, response_json};
pub(crate) use table::print_models_table;
