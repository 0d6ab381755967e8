use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("repository error: {0}")]
    Generic(Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        RepositoryError::NotFound(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        RepositoryError::AlreadyExists(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        RepositoryError::DatabaseError(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        RepositoryError::ConnectionError(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        RepositoryError::SerializationError(msg.into())
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            // Duplicate key (E11000) becomes AlreadyExists so the service
            // layer can turn it into a conflict
            ErrorKind::Write(_) if err.to_string().contains("E11000") => {
                RepositoryError::AlreadyExists(format!("duplicate key: {err}"))
            }
            ErrorKind::Write(_) => RepositoryError::DatabaseError(format!("write failed: {err}")),
            ErrorKind::Authentication { .. } | ErrorKind::Io(_) => {
                RepositoryError::ConnectionError(err.to_string())
            }
            ErrorKind::InvalidArgument { .. } => {
                RepositoryError::ValidationError(err.to_string())
            }
            _ => RepositoryError::Generic(Box::new(err)),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::SerializationError(format!("bson encode: {err}"))
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::SerializationError(format!("bson decode: {err}"))
    }
}
