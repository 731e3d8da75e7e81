//! Vitrine
//!
//! Pure pricing domain for the Vitrine storefront: minor-unit money
//! amounts and the cart quote computation shared by every surface that
//! displays or charges a total.

pub mod money;
pub mod pricing;

pub use money::{Amount, AmountError};
pub use pricing::{PricedLine, PricingError, Quote, quote};
