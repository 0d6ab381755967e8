use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::event_dto::{CreateEventRequest, UpdateEventRequest};
use crate::service::event_service::{EventService, EventServiceImpl};
use crate::util::error::HandlerError;

pub async fn public_events_handler(
    State(service): State<Arc<EventServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.public_events().await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn list_events_handler(
    State(service): State<Arc<EventServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list_events().await.map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn create_event_handler(
    State(service): State<Arc<EventServiceImpl>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    let res = service.create_event(payload).await.map_err(HandlerError::from)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn update_event_handler(
    State(service): State<Arc<EventServiceImpl>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    let res = service
        .update_event(&id, payload)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(res))
}

pub async fn delete_event_handler(
    State(service): State<Arc<EventServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_event(&id).await.map_err(HandlerError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
