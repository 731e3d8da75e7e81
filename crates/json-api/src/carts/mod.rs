//! Cart endpoints.

pub(crate) mod errors;
pub(crate) mod handlers;
