//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
