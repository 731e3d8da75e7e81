//! Session tokens: sign-in and bearer authentication.

pub mod errors;
pub mod models;
mod repository;
mod service;
pub mod token;

pub use errors::SessionsServiceError;
pub use models::{IssuedSession, SessionUuid};
pub use service::{MockSessionsService, PgSessionsService, SessionsService};
