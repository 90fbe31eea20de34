pub mod documents;

pub use documents::{CreateDocumentResponse, FilterDocumentsParams};
