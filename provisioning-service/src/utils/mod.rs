pub mod validation;

pub use validation::{parse_optional_json, ValidatedJson, ValidatedPath, ValidatedQuery};
