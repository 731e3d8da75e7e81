//! Checkout errors.

use thiserror::Error;
use vitrine::PricingError;

use crate::{
    carts::CartsServiceError, orders::OrdersServiceError, payments::PaymentGatewayError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No active cart, or the active cart has no lines.
    #[error("nothing to check out")]
    EmptyCart,

    /// A cart line carries a non-positive quantity and cannot be priced.
    #[error("cart contains an unpriceable line")]
    InvalidLineQuantity,

    /// The provider reported the charge as failed.
    #[error("payment failed: {0}")]
    ChargeFailed(String),

    /// The provider did not report the capture as completed.
    #[error("payment not completed: {0}")]
    CaptureIncomplete(String),

    #[error("pricing error")]
    Pricing(#[from] PricingError),

    #[error("payment provider error")]
    Gateway(#[from] PaymentGatewayError),

    #[error("cart storage error")]
    Carts(#[from] CartsServiceError),

    #[error("order storage error")]
    Orders(#[from] OrdersServiceError),
}
