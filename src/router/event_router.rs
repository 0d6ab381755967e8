use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::handler::event_handler::{
    create_event_handler, delete_event_handler, list_events_handler, public_events_handler,
    update_event_handler,
};
use crate::middlewares::admin_middleware::{require_admin, AdminAuthState};
use crate::service::event_service::EventServiceImpl;

pub fn event_router(service: Arc<EventServiceImpl>, admin_state: Arc<AdminAuthState>) -> Router {
    // Public upcoming-events route
    let public = Router::new().route("/events", get(public_events_handler));

    // Admin-protected event management
    let admin = Router::new()
        .route(
            "/admin/events",
            get(list_events_handler).post(create_event_handler),
        )
        .route(
            "/admin/events/{id}",
            put(update_event_handler).delete(delete_event_handler),
        )
        .route_layer(middleware::from_fn_with_state(admin_state, require_admin));

    public.merge(admin).with_state(service)
}
