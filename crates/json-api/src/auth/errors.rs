//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::{accounts::AccountsServiceError, sessions::SessionsServiceError};

pub(crate) fn account_into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        AccountsServiceError::MissingRequiredData | AccountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid signup payload")
        }
        AccountsServiceError::NotFound => StatusError::not_found(),
        AccountsServiceError::Sql(source) => {
            error!("account storage error: {source}");

            StatusError::internal_server_error()
        }
        AccountsServiceError::PasswordHash(source) => {
            error!("password hashing error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn session_into_status_error(error: SessionsServiceError) -> StatusError {
    match error {
        SessionsServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        SessionsServiceError::InvalidToken => {
            StatusError::unauthorized().brief("Invalid or expired session token")
        }
        SessionsServiceError::Sql(source) => {
            error!("session storage error: {source}");

            StatusError::internal_server_error()
        }
        SessionsServiceError::PasswordHash(source) => {
            error!("password verification error: {source}");

            StatusError::internal_server_error()
        }
    }
}
