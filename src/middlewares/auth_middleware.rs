use axum::{
    body::Body, extract::State, http::Request, middleware::Next, response::Response,
};
use std::sync::Arc;

use crate::util::cookies::{read_cookie, ACCESS_TOKEN_COOKIE};
use crate::util::error::HandlerError;
use crate::util::jwt::{TokenIssuer, TokenIssuerImpl};

pub struct AuthState {
    pub token_issuer: Arc<TokenIssuerImpl>,
}

/// Resolve the caller's access token: Authorization header first, then the
/// auth cookie. Refresh tokens are never accepted here.
fn extract_access_token(state: &AuthState, req: &Request<Body>) -> Option<String> {
    if let Some(auth_header) = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
    {
        if let Ok(token) = state.token_issuer.extract_token_from_header(auth_header) {
            return Some(token);
        }
    }
    read_cookie(req.headers(), ACCESS_TOKEN_COOKIE)
}

pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let token = extract_access_token(&state, &req)
        .ok_or_else(|| HandlerError::unauthorized("Authentication required"))?;

    let claims = state
        .token_issuer
        .validate_access_token(&token)
        .map_err(|_| HandlerError::unauthorized("Invalid or expired token"))?;

    // Downstream handlers read the verified claims from extensions
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
