use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handler::admin_handler::{
    create_user_handler, dashboard_handler, decide_upload_handler, delete_user_handler,
    list_users_handler, pending_uploads_handler, update_user_handler,
};
use crate::middlewares::admin_middleware::{require_admin, AdminAuthState};
use crate::service::review_service::ReviewServiceImpl;
use crate::service::user_service::UserServiceImpl;

pub fn admin_router(
    review_service: Arc<ReviewServiceImpl>,
    user_service: Arc<UserServiceImpl>,
    admin_state: Arc<AdminAuthState>,
) -> Router {
    let review = Router::new()
        .route("/admin/dashboard", get(dashboard_handler))
        .route("/admin/uploads", get(pending_uploads_handler))
        .route("/admin/upload/{id}/update", post(decide_upload_handler))
        .with_state(review_service);

    let users = Router::new()
        .route(
            "/admin/users",
            get(list_users_handler).post(create_user_handler),
        )
        .route(
            "/admin/users/{id}",
            put(update_user_handler).delete(delete_user_handler),
        )
        .with_state(user_service);

    review
        .merge(users)
        .route_layer(middleware::from_fn_with_state(admin_state, require_admin))
}
