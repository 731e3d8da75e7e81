//! Orders API Errors

use salvo::prelude::*;

use vitrine_app::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Related resource not found")
        }
        OrdersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Missing required data")
        }
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid data"),
        OrdersServiceError::Sql(error) => {
            tracing::error!("orders storage error: {error}");

            StatusError::internal_server_error()
        }
    }
}
