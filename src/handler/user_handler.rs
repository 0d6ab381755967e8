use axum::{
    extract::{Json, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse},
};
use std::sync::Arc;
use validator::Validate;

use crate::dto::user_dto::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::cookies::{
    build_auth_cookie, clear_auth_cookie, read_cookie, ACCESS_TOKEN_COOKIE,
    REFRESH_COOKIE_MAX_AGE_SECS, REFRESH_TOKEN_COOKIE,
};
use crate::util::error::HandlerError;

pub async fn register_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    let res = service.register(payload).await.map_err(HandlerError::from)?;
    Ok((StatusCode::CREATED, Json(res)))
}

/// Issues the token pair both in the body and as HttpOnly cookies, so
/// browser clients and API clients work off the same endpoint
pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|e| HandlerError::from_validation(&e))?;
    let res = service.login(payload).await.map_err(HandlerError::from)?;

    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            build_auth_cookie(
                ACCESS_TOKEN_COOKIE,
                &res.tokens.access_token,
                res.tokens.expires_in,
            ),
        ),
        (
            SET_COOKIE,
            build_auth_cookie(
                REFRESH_TOKEN_COOKIE,
                &res.tokens.refresh_token,
                REFRESH_COOKIE_MAX_AGE_SECS,
            ),
        ),
    ]);

    Ok((cookies, Json(res)))
}

/// Refresh token comes from the body when present, otherwise from the
/// refresh cookie
pub async fn refresh_token_handler(
    State(service): State<Arc<UserServiceImpl>>,
    headers: HeaderMap,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let refresh_token = payload
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| read_cookie(&headers, REFRESH_TOKEN_COOKIE))
        .ok_or_else(|| HandlerError::unauthorized("Missing refresh token"))?;

    let tokens = service
        .refresh_token(refresh_token)
        .await
        .map_err(HandlerError::from)?;

    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            build_auth_cookie(ACCESS_TOKEN_COOKIE, &tokens.access_token, tokens.expires_in),
        ),
        (
            SET_COOKIE,
            build_auth_cookie(
                REFRESH_TOKEN_COOKIE,
                &tokens.refresh_token,
                REFRESH_COOKIE_MAX_AGE_SECS,
            ),
        ),
    ]);

    Ok((cookies, Json(tokens)))
}

/// Stateless logout: expire both auth cookies
pub async fn logout_handler() -> impl IntoResponse {
    let cookies = AppendHeaders([
        (SET_COOKIE, clear_auth_cookie(ACCESS_TOKEN_COOKIE)),
        (SET_COOKIE, clear_auth_cookie(REFRESH_TOKEN_COOKIE)),
    ]);
    (cookies, Json(serde_json::json!({ "message": "Logged out" })))
}
