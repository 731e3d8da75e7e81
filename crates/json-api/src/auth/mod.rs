//! Signup, signin, and bearer/cookie authentication.

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod middleware;
