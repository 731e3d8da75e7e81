//! Product catalogue.

pub mod errors;
pub mod models;
pub(crate) mod repository;
mod service;

pub use errors::ProductsServiceError;
pub use models::{NewProduct, Product, ProductUuid};
pub use service::{MockProductsService, PgProductsService, ProductsService};
