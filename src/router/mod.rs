pub mod admin_router;
pub mod contact_router;
pub mod event_router;
pub mod profile_router;
pub mod submission_router;
pub mod user_router;

use axum::{routing::get, Json, Router};

pub use admin_router::admin_router;
pub use contact_router::contact_router;
pub use event_router::event_router;
pub use profile_router::profile_router;
pub use submission_router::submission_router;
pub use user_router::user_router;

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn health_router() -> Router {
    Router::new().route("/health", get(health_handler))
}
