use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handler::user_handler::{
    login_handler, logout_handler, refresh_token_handler, register_handler,
};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    // Auth surface is fully public; tokens come out, never go in
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/refresh", post(refresh_token_handler))
        .route("/logout", post(logout_handler))
        .with_state(service)
}
