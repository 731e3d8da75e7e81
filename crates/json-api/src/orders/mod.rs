//! Orders API

pub(crate) mod errors;
pub(crate) mod handlers;
