//! Shopping carts: one active cart per user, merged line items.

pub mod errors;
pub mod models;
mod repositories;
mod service;

pub use errors::CartsServiceError;
pub use models::{ActiveCart, AddItem, Cart, CartItem, CartItemUuid, CartLine, CartStatus, CartUuid};
pub use service::{CartsService, MockCartsService, PgCartsService};
