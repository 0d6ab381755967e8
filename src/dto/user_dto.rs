use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::user::User;
use crate::util::jwt::TokenPair;

// --- Validated DTOs for request validation ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// One of: researcher, university, conf_organizer, public_visitor.
    /// Absent or empty defaults to public_visitor.
    pub role: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone_number: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub university_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminCreateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 8, max = 128))]
    pub confirm_password: String,

    #[validate(length(min = 2, max = 50))]
    pub role: String,

    #[validate(length(min = 6, max = 20))]
    pub phone_number: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub university_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub role: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone_number: Option<String>,

    #[validate(length(min = 2, max = 200))]
    pub university_name: Option<String>,
}

// --- Response DTOs ---

/// User as exposed over the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub phone_number: Option<String>,
    pub university_name: Option<String>,
    pub created_at: Option<String>,
}

impl UserView {
    pub fn from_user(user: &User) -> Self {
        UserView {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            phone_number: user.phone_number.clone(),
            university_name: user.university_name.clone(),
            created_at: user.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Client-side landing page for the user's role
    pub redirect: String,
    pub user: UserView,
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserView,
    pub redirect: String,
}
