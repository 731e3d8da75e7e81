//! Tracking errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackingError {
    /// An HTTP transport or serialization error occurred.
    #[error("carrier request failed")]
    Http(#[from] reqwest::Error),

    /// The carrier answered with a non-success status.
    #[error("carrier returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The carrier answered with a body we could not interpret.
    #[error("unexpected response from carrier: {0}")]
    UnexpectedResponse(String),
}
