use crate::app::AppError;
use std::fmt;

pub type AuthResult<T> = Result<T, AuthError>;

/// Failures of an interactive popup flow, reported by the popup handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupError {
    /// The platform refused to open the popup window.
    Blocked,
    /// The user closed the popup before completing the flow.
    ClosedByUser,
    /// A newer popup request superseded this one.
    Cancelled,
}

impl PopupError {
    /// Error code used by the web SDK for the same condition.
    pub fn code(&self) -> &'static str {
        match self {
            PopupError::Blocked => "auth/popup-blocked",
            PopupError::ClosedByUser => "auth/popup-closed-by-user",
            PopupError::Cancelled => "auth/cancelled-popup-request",
        }
    }
}

impl fmt::Display for PopupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            PopupError::Blocked => "The popup was blocked by the platform",
            PopupError::ClosedByUser => "The popup was closed before the operation completed",
            PopupError::Cancelled => "The popup request was cancelled by a newer request",
        };
        write!(f, "{message} ({})", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    App(AppError),
    Network(String),
    /// Error returned by the identity backend, keyed by an `auth/...` code.
    Backend { code: String, message: String },
    Popup(PopupError),
    InvalidCredential(String),
    NotImplemented(&'static str),
}

impl AuthError {
    /// Returns the `auth/...` code when the error carries one.
    pub fn code(&self) -> Option<&str> {
        match self {
            AuthError::Backend { code, .. } => Some(code),
            AuthError::Popup(err) => Some(err.code()),
            AuthError::Network(_) => Some("auth/network-request-failed"),
            _ => None,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::App(err) => write!(f, "{}", err),
            AuthError::Network(message) => write!(f, "Network error: {message}"),
            AuthError::Backend { code, message } => write!(f, "{message} ({code})"),
            AuthError::Popup(err) => write!(f, "{err}"),
            AuthError::InvalidCredential(message) => write!(f, "Invalid credential: {message}"),
            AuthError::NotImplemented(feature) => write!(f, "{feature} is not implemented"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::App(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AppError> for AuthError {
    fn from(error: AppError) -> Self {
        AuthError::App(error)
    }
}

impl From<PopupError> for AuthError {
    fn from(error: PopupError) -> Self {
        AuthError::Popup(error)
    }
}
