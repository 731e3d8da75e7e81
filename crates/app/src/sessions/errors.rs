//! Sessions service errors.

use sqlx::Error;
use thiserror::Error;

use crate::accounts::password::PasswordHashError;

#[derive(Debug, Error)]
pub enum SessionsServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired session token")]
    InvalidToken,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("password hashing error")]
    PasswordHash(#[from] PasswordHashError),
}

impl From<Error> for SessionsServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
