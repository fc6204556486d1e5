use thiserror::Error;

/// Errors for app logic (use cases, sessions).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Login required")]
    AuthenticationRequired,

    #[error("Wrong authentication credentials")]
    WrongAuthCredentials,

    #[error(transparent)]
    PasswordHash(#[from] password_hash::Error),

    #[error("Invalid cookie secret: {0}")]
    InvalidCookieSecret(String),
}
