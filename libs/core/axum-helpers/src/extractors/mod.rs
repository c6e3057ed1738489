//! Extractors that reject with [`crate::errors::AppError`] so every client
//! error shares the same response body.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
