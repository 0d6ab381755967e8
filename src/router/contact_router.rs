use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handler::contact_handler::contact_handler;
use crate::service::contact_service::ContactServiceImpl;

pub fn contact_router(service: Arc<ContactServiceImpl>) -> Router {
    Router::new()
        .route("/contact", post(contact_handler))
        .with_state(service)
}
