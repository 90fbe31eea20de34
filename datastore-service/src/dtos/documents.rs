use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct CreateDocumentResponse {
    pub status: String,
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct FilterDocumentsParams {
    pub category: Option<String>,
}
