use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bytes::BytesMut;
use std::sync::Arc;
use tracing::{debug, error, info};
use validator::Validate;

use crate::dto::submission_dto::{FileUpload, UploadRequest};
use crate::service::submission_service::{SubmissionService, SubmissionServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

async fn read_file_field(field: axum::extract::multipart::Field<'_>) -> Result<FileUpload, HandlerError> {
    let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_default();
    let mut buf = BytesMut::new();
    let mut stream = field;
    while let Some(chunk) = stream.chunk().await.map_err(|e| {
        error!("Error reading file chunk: {}", e);
        HandlerError::bad_request(format!("Failed to read file chunk: {}", e))
    })? {
        buf.extend_from_slice(&chunk);
    }
    info!("Received file: {} ({} bytes)", filename, buf.len());
    Ok(FileUpload {
        filename,
        content_type,
        size: buf.len(),
        content: buf.to_vec(),
    })
}

/// Multipart upload: a `json` field with the metadata, a `file` field with
/// the document, and an optional `cover` image
pub async fn upload_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    info!("Upload handler called");
    let mut payload: Option<UploadRequest> = None;
    let mut file: Option<FileUpload> = None;
    let mut cover: Option<FileUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HandlerError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        debug!("Processing upload field: {}", name);
        match name.as_str() {
            "json" => {
                let data = field.bytes().await.map_err(|e| {
                    HandlerError::bad_request(format!("Failed to read json field: {}", e))
                })?;
                let request: UploadRequest = serde_json::from_slice(&data)
                    .map_err(|e| HandlerError::bad_request(format!("Invalid JSON: {}", e)))?;
                payload = Some(request);
            }
            "file" => file = Some(read_file_field(field).await?),
            "cover" => cover = Some(read_file_field(field).await?),
            _ => debug!("Ignoring unknown field: {}", name),
        }
    }

    let payload =
        payload.ok_or_else(|| HandlerError::bad_request("Missing submission JSON data"))?;
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    let file = file.ok_or_else(|| HandlerError::bad_request("Missing submission file"))?;
    if file.size == 0 {
        return Err(HandlerError::bad_request("Submission file is empty"));
    }

    let res = service
        .create(&claims, payload, file, cover)
        .await
        .map_err(HandlerError::from)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn my_uploads_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.my_uploads(&claims).await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn public_list_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.public_list().await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn public_detail_handler(
    State(service): State<Arc<SubmissionServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.public_detail(&id).await.map_err(HandlerError::from)?;
    Ok(Json(res))
}
