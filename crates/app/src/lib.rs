//! Storefront domain and persistence modules.

pub mod accounts;
pub mod carts;
pub mod checkout;
pub mod context;
pub mod database;
pub mod orders;
pub mod payments;
pub mod products;
pub mod sessions;
pub mod tracking;

#[cfg(test)]
mod test;
mod uuids;

pub use uuids::TypedUuid;
