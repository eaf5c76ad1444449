use crate::guard::Action;
use thiserror::Error;

/// Failures from the identity service or the local auth state.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email or password left blank; nothing was sent.
    #[error("Please enter both email and password")]
    MissingCredentials,

    /// The identity service rejected the email/password pair.
    #[error("Invalid login credentials: {0}")]
    InvalidCredentials(String),

    /// The stored session is past its expiry.
    #[error("Session expired")]
    SessionExpired,

    /// The operation needs a signed-in user.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Any other identity service failure.
    #[error("Auth service error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Auth request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The crate's error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was blank; caught before dispatch.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Backend failure, message surfaced verbatim.
    #[error("Remote error ({status}): {message}")]
    Remote {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Contact form insert failed.
    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    /// The user declined a confirmation prompt.
    #[error("Cancelled by user")]
    Cancelled,

    /// The same action is already waiting on the backend.
    #[error("{0} is already in progress")]
    InFlight(Action),
}

impl Error {
    /// PostgREST reports "zero rows for a single-object request" as PGRST116.
    pub fn is_no_rows(&self) -> bool {
        matches!(self, Error::Remote { code: Some(code), .. } if code == "PGRST116")
    }

    /// Message suitable for an inline error field or a notification.
    pub fn user_message(&self) -> String {
        match self {
            Error::Remote { message, .. } => message.clone(),
            Error::Submission(message) => message.clone(),
            Error::Auth(AuthError::InvalidCredentials(message)) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A `Result` type that uses `Error` as the error type.
pub type Result<T> = std::result::Result<T, Error>;
