use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::dto::contact_dto::ContactRequest;
use crate::service::contact_service::{ContactService, ContactServiceImpl};
use crate::util::error::HandlerError;

pub async fn contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    service.relay(payload).await.map_err(HandlerError::from)?;
    Ok(Json(serde_json::json!({ "message": "Message sent" })))
}
