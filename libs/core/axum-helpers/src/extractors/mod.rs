//! Custom extractors for Axum handlers.

pub mod cancellation;
pub mod id_path;
pub mod validated_json;

pub use cancellation::RequestCancellation;
pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
