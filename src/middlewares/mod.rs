pub mod admin_middleware;
pub mod auth_middleware;

pub use admin_middleware::{require_admin, AdminAuthState};
pub use auth_middleware::{require_auth, AuthState};
