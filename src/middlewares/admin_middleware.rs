use axum::{
    body::Body, extract::State, http::Request, middleware::Next, response::Response,
};
use std::sync::Arc;

use crate::util::cookies::{read_cookie, ACCESS_TOKEN_COOKIE};
use crate::util::error::HandlerError;
use crate::util::jwt::{TokenIssuer, TokenIssuerImpl};
use crate::util::policy::AccessPolicy;

pub struct AdminAuthState {
    pub token_issuer: Arc<TokenIssuerImpl>,
    pub policy: AccessPolicy,
}

/// Authentication plus the staff/admin gate for management routes
pub async fn require_admin(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|h| state.token_issuer.extract_token_from_header(h).ok())
        .or_else(|| read_cookie(req.headers(), ACCESS_TOKEN_COOKIE))
        .ok_or_else(|| HandlerError::unauthorized("Authentication required"))?;

    let claims = state
        .token_issuer
        .validate_access_token(&token)
        .map_err(|_| HandlerError::unauthorized("Invalid or expired token"))?;

    state
        .policy
        .require_staff_or_admin(&claims)
        .map_err(HandlerError::from)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
