use shared_types::AppError;

/// Failure reported by an [`AuthBackend`](crate::AuthBackend) implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("invalid login credentials")]
    InvalidCredentials,
    #[error("email not confirmed")]
    EmailNotConfirmed,
    #[error("network error: {0}")]
    Network(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("backend returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        BackendError::Decode(e.to_string())
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::InvalidCredentials => AppError::invalid_credentials(),
            BackendError::EmailNotConfirmed => AppError::email_not_confirmed(),
            BackendError::Network(msg) => AppError::network(msg),
            BackendError::NotFound(msg) => AppError::not_found(msg),
            BackendError::Http { status: 401, message } => AppError::unauthorized(message),
            BackendError::Http { status: 403, message } => AppError::forbidden(message),
            BackendError::Http { message, .. } => AppError::backend(message),
            BackendError::Decode(msg) | BackendError::Config(msg) => AppError::backend(msg),
        }
    }
}
