use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::submission_dto::ReviewDecisionRequest;
use crate::dto::user_dto::{AdminCreateUserRequest, AdminUpdateUserRequest};
use crate::service::review_service::{ReviewService, ReviewServiceImpl};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;

// --- Review gateway ---

pub async fn dashboard_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.dashboard(&claims).await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn pending_uploads_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service
        .list_pending(&claims)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn decide_upload_handler(
    State(service): State<Arc<ReviewServiceImpl>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewDecisionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    let res = service
        .decide(&claims, &id, &payload.action, payload.feedback)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(res))
}

// --- User management ---

pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list_users().await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn create_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<AdminCreateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    let res = service.create_user(payload).await.map_err(HandlerError::from)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<AdminUpdateUserRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    let res = service
        .update_user(&id, payload)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_user(&id).await.map_err(HandlerError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
