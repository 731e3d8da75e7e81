//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;
use vitrine::PricingError;

use vitrine_app::{
    carts::CartsServiceError, checkout::CheckoutError, payments::PaymentGatewayError,
};

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyCart | CheckoutError::Pricing(PricingError::EmptyCart) => {
            StatusError::bad_request().brief("Nothing to check out")
        }
        CheckoutError::InvalidLineQuantity => {
            StatusError::bad_request().brief("Cart contains an unpriceable line")
        }
        CheckoutError::ChargeFailed(message) => {
            StatusError::bad_request().brief(format!("Payment failed: {message}"))
        }
        CheckoutError::CaptureIncomplete(status) => {
            StatusError::bad_request().brief(format!("Payment not completed: {status}"))
        }
        CheckoutError::Gateway(PaymentGatewayError::Rejected(message)) => {
            StatusError::bad_request().brief(format!("Payment provider rejected: {message}"))
        }
        CheckoutError::Gateway(source) => {
            error!("payment provider error: {source}");

            StatusError::internal_server_error()
        }
        // The cart disappeared between quoting and completion; a
        // concurrent checkout won.
        CheckoutError::Carts(CartsServiceError::NotFound) => {
            StatusError::conflict().brief("Cart was already checked out")
        }
        CheckoutError::Pricing(source) => {
            error!("pricing error during checkout: {source}");

            StatusError::internal_server_error()
        }
        CheckoutError::Carts(source) => {
            error!("cart storage error during checkout: {source}");

            StatusError::internal_server_error()
        }
        CheckoutError::Orders(source) => {
            error!("order storage error during checkout: {source}");

            StatusError::internal_server_error()
        }
    }
}
