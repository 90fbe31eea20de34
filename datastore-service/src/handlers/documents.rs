use crate::dtos::{CreateDocumentResponse, FilterDocumentsParams};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use metrics::counter;
use mongodb::bson::{doc, Document};
use mongodb::Cursor;
use service_core::error::AppError;

/// Persist the request body as-is. The body must parse as a JSON object;
/// `_id` assignment is the store's business.
pub async fn create_document(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Request body is not valid JSON: {}", e))
    })?;

    let document = mongodb::bson::to_document(&value)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("JSON body must be an object")))?;

    state
        .db
        .documents()
        .insert_one(document, None)
        .await
        .map_err(AppError::from)?;

    counter!("documents_created_total").increment(1);
    tracing::info!("Document created");

    Ok((
        StatusCode::CREATED,
        Json(CreateDocumentResponse {
            status: "Document created successfully".to_string(),
            data: value,
        }),
    ))
}

pub async fn list_documents(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cursor = state
        .db
        .documents()
        .find(None, None)
        .await
        .map_err(AppError::from)?;

    let documents = drain_documents(cursor).await?;
    if documents.is_empty() {
        return Err(AppError::NotFound(anyhow::anyhow!("No documents found")));
    }

    Ok(Json(documents))
}

pub async fn filter_documents(
    State(state): State<AppState>,
    Query(params): Query<FilterDocumentsParams>,
) -> Result<impl IntoResponse, AppError> {
    // An empty value counts as missing, like an absent parameter.
    let category = params
        .category
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!(
                "Missing required query parameter 'category'"
            ))
        })?;

    let cursor = state
        .db
        .documents()
        .find(doc! { "category": &category }, None)
        .await
        .map_err(AppError::from)?;

    let documents = drain_documents(cursor).await?;
    if documents.is_empty() {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "No documents found for category '{}'",
            category
        )));
    }

    Ok(Json(documents))
}

/// Collect a cursor into the JSON representation of each stored document.
async fn drain_documents(mut cursor: Cursor<Document>) -> Result<Vec<serde_json::Value>, AppError> {
    let mut documents = Vec::new();
    while let Some(document) = cursor.try_next().await.map_err(AppError::from)? {
        let value = serde_json::to_value(&document).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to serialize document: {}", e))
        })?;
        documents.push(value);
    }
    Ok(documents)
}
