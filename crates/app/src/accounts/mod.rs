//! Customer accounts: registration and lookup.

pub mod errors;
pub mod models;
pub(crate) mod password;
mod repository;
mod service;

pub use errors::AccountsServiceError;
pub use models::{Account, NewAccount, UserUuid};
pub use service::{AccountsService, MockAccountsService, PgAccountsService};
