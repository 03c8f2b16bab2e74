//! Custom axum extractors.

mod validated_json;

pub use validated_json::ValidatedJson;
pub(crate) use validated_json::format_validation_errors;
