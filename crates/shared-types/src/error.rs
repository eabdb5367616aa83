use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppErrorKind {
    InvalidCredentials,
    EmailNotConfirmed,
    Network,
    NotFound,
    Unauthorized,
    Forbidden,
    Validation,
    Backend,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::InvalidCredentials => write!(f, "InvalidCredentials"),
            AppErrorKind::EmailNotConfirmed => write!(f, "EmailNotConfirmed"),
            AppErrorKind::Network => write!(f, "Network"),
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::Validation => write!(f, "Validation"),
            AppErrorKind::Backend => write!(f, "Backend"),
        }
    }
}

/// Structured error handed from the session layer to the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
}

impl AppError {
    pub fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::new(AppErrorKind::InvalidCredentials, "Invalid login credentials")
    }

    pub fn email_not_confirmed() -> Self {
        Self::new(AppErrorKind::EmailNotConfirmed, "Email not confirmed")
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Network, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Forbidden, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Validation, message)
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Backend, message)
    }

    /// Localized text for a notice.
    ///
    /// Credential, confirmation and connectivity failures get fixed wording;
    /// any other kind uses `fallback` so each call site keeps its own phrasing.
    pub fn user_message(&self, fallback: &str) -> String {
        match self.kind {
            AppErrorKind::InvalidCredentials => {
                "Email atau kata sandi salah. Silakan coba lagi.".to_string()
            }
            AppErrorKind::EmailNotConfirmed => {
                "Email Anda belum diverifikasi. Silakan periksa kotak masuk Anda.".to_string()
            }
            AppErrorKind::Network => "Gagal terhubung dengan sistem. Silakan coba lagi.".to_string(),
            AppErrorKind::Validation => self.message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}
