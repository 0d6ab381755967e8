use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Extension, Json,
};
use bytes::BytesMut;
use std::sync::Arc;
use tracing::{debug, error};
use validator::Validate;

use crate::dto::profile_dto::UpdateProfileRequest;
use crate::dto::submission_dto::FileUpload;
use crate::service::profile_service::{ProfileService, ProfileServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

pub async fn get_me_handler(
    State(service): State<Arc<ProfileServiceImpl>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.me(&claims).await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

/// Multipart update: a `json` field with the profile fields, plus an
/// optional `image` file
pub async fn update_me_handler(
    State(service): State<Arc<ProfileServiceImpl>>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    let mut payload: Option<UpdateProfileRequest> = None;
    let mut image: Option<FileUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HandlerError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        debug!("Processing profile field: {}", name);
        if name == "json" {
            let data = field.bytes().await.map_err(|e| {
                HandlerError::bad_request(format!("Failed to read json field: {}", e))
            })?;
            let request: UpdateProfileRequest = serde_json::from_slice(&data)
                .map_err(|e| HandlerError::bad_request(format!("Invalid JSON: {}", e)))?;
            payload = Some(request);
        } else if name == "image" {
            let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_default();
            let mut buf = BytesMut::new();
            let mut stream = field;
            while let Some(chunk) = stream.chunk().await.map_err(|e| {
                error!("Error reading image chunk: {}", e);
                HandlerError::bad_request(format!("Failed to read image: {}", e))
            })? {
                buf.extend_from_slice(&chunk);
            }
            image = Some(FileUpload {
                filename,
                content_type,
                size: buf.len(),
                content: buf.to_vec(),
            });
        }
    }

    let payload = payload.unwrap_or(UpdateProfileRequest {
        national_id: None,
        age: None,
        phone: None,
        degree: None,
        university: None,
    });
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;

    let res = service
        .update(&claims, payload, image)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(res))
}
