use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use metrics::counter;
use service_core::error::AppError;

/// Store the multipart field named `file` in the blob sink. The filename
/// declared by the client is echoed in the response; the key the bytes end
/// up under is whatever the sink assigns.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("unnamed").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| {
                AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
            })?
            .to_vec();
        let size = data.len();

        let key = state.blobs.put(&filename, data).await.map_err(|e| {
            tracing::error!("Failed to store uploaded file '{}': {}", filename, e);
            e
        })?;

        counter!("files_uploaded_total").increment(1);
        tracing::info!(
            filename = %filename,
            key = %key,
            size = %size,
            "File upload completed"
        );

        return Ok((
            StatusCode::OK,
            format!("File '{}' uploaded successfully", filename),
        ));
    }

    Err(AppError::BadRequest(anyhow::anyhow!(
        "No file found in the request. Send the file in the 'file' form field."
    )))
}
