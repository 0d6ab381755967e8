mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{InMemoryBlobStorage, InMemoryProfileRepository, InMemoryUserRepository};
use openscholar_backend::config::JwtConfig;
use openscholar_backend::middlewares::auth_middleware::AuthState;
use openscholar_backend::router::{health_router, profile_router, user_router};
use openscholar_backend::service::profile_service::ProfileServiceImpl;
use openscholar_backend::service::user_service::UserServiceImpl;
use openscholar_backend::util::jwt::TokenIssuerImpl;

fn test_app() -> Router {
    let user_repo = Arc::new(InMemoryUserRepository::default());
    let profile_repo = Arc::new(InMemoryProfileRepository::default());
    let token_issuer = Arc::new(TokenIssuerImpl::new(JwtConfig::default()));

    let user_service = Arc::new(UserServiceImpl::new(
        user_repo.clone(),
        profile_repo.clone(),
        token_issuer.clone(),
    ));
    let profile_service = Arc::new(ProfileServiceImpl::new(
        profile_repo,
        user_repo,
        Arc::new(InMemoryBlobStorage::default()),
    ));
    let auth_state = Arc::new(AuthState { token_issuer });

    Router::new()
        .merge(user_router(user_service))
        .merge(profile_router(profile_service, auth_state))
        .merge(health_router())
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_login_and_cookies() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "/register",
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "a-strong-password",
                "role": "researcher"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "/login",
            serde_json::json!({
                "email": "alice@example.com",
                "password": "a-strong-password"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["redirect"], "/researcher");
    assert!(body["tokens"]["access_token"].is_string());
}

#[tokio::test]
async fn test_register_rejects_invalid_payload() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "/register",
            serde_json::json!({
                "username": "alice",
                "email": "not-an-email",
                "password": "short",
                "role": "researcher"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let app = test_app();

    app.clone()
        .oneshot(json_request(
            "/register",
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "a-strong-password",
                "role": "researcher"
            }),
        ))
        .await
        .unwrap();
    let login = app
        .clone()
        .oneshot(json_request(
            "/login",
            serde_json::json!({
                "email": "alice@example.com",
                "password": "a-strong-password"
            }),
        ))
        .await
        .unwrap();
    let login_body = body_json(login).await;
    let access_token = login_body["tokens"]["access_token"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_logout_expires_cookies() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}
