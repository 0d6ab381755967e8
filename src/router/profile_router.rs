use axum::{middleware, routing::get, Router};
use std::sync::Arc;

use crate::handler::profile_handler::{get_me_handler, update_me_handler};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::profile_service::ProfileServiceImpl;

pub fn profile_router(service: Arc<ProfileServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/me", get(get_me_handler).patch(update_me_handler))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth))
        .with_state(service)
}
