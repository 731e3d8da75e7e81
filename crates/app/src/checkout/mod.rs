//! Checkout orchestration: price the active cart, charge, record, complete.

pub mod errors;
mod service;

pub use errors::CheckoutError;
pub use service::{
    CheckoutOrchestrator, CheckoutReceipt, CheckoutService, MockCheckoutService,
    PaymentInstrument, RedirectCheckout, RedirectUrls,
};
