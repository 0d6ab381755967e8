use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::submission_handler::{
    my_uploads_handler, public_detail_handler, public_list_handler, upload_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::submission_service::SubmissionServiceImpl;

pub fn submission_router(
    service: Arc<SubmissionServiceImpl>,
    auth_state: Arc<AuthState>,
) -> Router {
    // Public catalog routes
    let public = Router::new()
        .route("/publications", get(public_list_handler))
        .route("/book/{id}", get(public_detail_handler));

    // Authenticated upload routes
    let authed = Router::new()
        .route("/upload", post(upload_handler))
        .route("/my-uploads", get(my_uploads_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    public.merge(authed).with_state(service)
}
