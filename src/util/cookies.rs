use axum::http::HeaderMap;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Refresh cookies outlive the access cookie by a week
pub const REFRESH_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 3600;

/// Build an auth cookie. HttpOnly and SameSite=Lax; the Secure flag is
/// left to the reverse proxy in the observed deployments.
pub fn build_auth_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        name, value, max_age_secs
    )
}

/// Expire an auth cookie immediately
pub fn clear_auth_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", name)
}

/// Read a cookie value from the request Cookie header
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie_header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    for pair in cookie_header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let key = parts.next()?;
        if key == name {
            return parts.next().map(|v| v.to_string());
        }
    }
    None
}
