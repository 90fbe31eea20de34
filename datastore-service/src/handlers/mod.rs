pub mod documents;
pub mod files;
pub mod health;

pub use documents::{create_document, filter_documents, list_documents};
pub use files::upload_file;
pub use health::{health_check, metrics_endpoint, readiness_check};
