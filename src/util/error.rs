use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::error;

#[derive(Debug, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    Internal,
    Unauthorized,
    Forbidden,
    Conflict,
    BadRequest,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Forbidden => "Forbidden",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::BadRequest => "BadRequest",
        };
        write!(f, "{}", s)
    }
}

/// Boundary error: every failure leaving the HTTP layer is one of these,
/// serialized as `{error, message, details}`.
#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    /// Field → message map for validation failures
    pub details: Option<serde_json::Value>,
}

impl HandlerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::Unauthorized,
            message: message.into(),
            details: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::Forbidden,
            message: message.into(),
            details: None,
        }
    }

    /// Flatten `validator` errors into a field → message map
    pub fn from_validation(errors: &validator::ValidationErrors) -> Self {
        let mut fields = serde_json::Map::new();
        for (field, errs) in errors.field_errors() {
            let message = errs
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            fields.insert(field.to_string(), serde_json::Value::String(message));
        }
        HandlerError {
            error: HandlerErrorKind::Validation,
            message: "Validation error".to_string(),
            details: Some(serde_json::Value::Object(fields)),
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HandlerErrorKind::Conflict => StatusCode::CONFLICT,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

/// Domain-level error taxonomy. Services return these; the boundary maps
/// them onto HTTP responses.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Unknown email or wrong password; never distinguishes the two
    InvalidCredentials,
    Unauthenticated,
    Forbidden,
    NotFound(String),
    /// Field → message map
    Validation(HashMap<String, String>),
    DuplicateEmail,
    /// The requested lifecycle action is not applicable
    InvalidAction(String),
    /// A required field was absent
    MissingField(&'static str),
    InternalError(String),
}

impl ServiceError {
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut map = HashMap::new();
        map.insert(field.into(), message.into());
        ServiceError::Validation(map)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidCredentials => write!(f, "Invalid credentials"),
            ServiceError::Unauthenticated => write!(f, "Authentication required"),
            ServiceError::Forbidden => write!(f, "Forbidden"),
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::Validation(fields) => write!(f, "Validation error: {:?}", fields),
            ServiceError::DuplicateEmail => write!(f, "A user with that email already exists"),
            ServiceError::InvalidAction(msg) => write!(f, "Invalid action: {}", msg),
            ServiceError::MissingField(field) => write!(f, "Missing field: {}", field),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::AlreadyExists(_) => ServiceError::DuplicateEmail,
            RepositoryError::ValidationError(msg) => {
                ServiceError::validation_field("detail", msg)
            }
            RepositoryError::DatabaseError(msg)
            | RepositoryError::ConnectionError(msg)
            | RepositoryError::SerializationError(msg) => ServiceError::InternalError(msg),
            RepositoryError::Generic(e) => ServiceError::InternalError(e.to_string()),
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => HandlerError {
                error: HandlerErrorKind::Unauthorized,
                message: "Invalid credentials".to_string(),
                details: None,
            },
            ServiceError::Unauthenticated => HandlerError {
                error: HandlerErrorKind::Unauthorized,
                message: "Authentication required".to_string(),
                details: None,
            },
            ServiceError::Forbidden => HandlerError {
                error: HandlerErrorKind::Forbidden,
                message: "You do not have permission to perform this action".to_string(),
                details: None,
            },
            ServiceError::NotFound(msg) => HandlerError {
                error: HandlerErrorKind::NotFound,
                message: msg,
                details: None,
            },
            ServiceError::Validation(fields) => {
                let map: serde_json::Map<String, serde_json::Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect();
                HandlerError {
                    error: HandlerErrorKind::Validation,
                    message: "Validation error".to_string(),
                    details: Some(serde_json::Value::Object(map)),
                }
            }
            ServiceError::DuplicateEmail => HandlerError {
                error: HandlerErrorKind::Conflict,
                message: "A user with that email already exists".to_string(),
                details: None,
            },
            ServiceError::InvalidAction(msg) => HandlerError {
                error: HandlerErrorKind::BadRequest,
                message: msg,
                details: None,
            },
            ServiceError::MissingField(field) => {
                let mut map = serde_json::Map::new();
                map.insert(
                    field.to_string(),
                    serde_json::Value::String("Required.".to_string()),
                );
                HandlerError {
                    error: HandlerErrorKind::Validation,
                    message: format!("Missing field: {}", field),
                    details: Some(serde_json::Value::Object(map)),
                }
            }
            // Never leak storage/mail internals to clients
            ServiceError::InternalError(msg) => {
                error!("Internal error surfaced at boundary: {}", msg);
                HandlerError {
                    error: HandlerErrorKind::Internal,
                    message: "Internal server error".to_string(),
                    details: None,
                }
            }
        }
    }
}
