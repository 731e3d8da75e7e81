//! Tracking API Errors

use salvo::prelude::*;

use vitrine_app::tracking::TrackingError;

/// Carrier-side failures surface to the client under the carrier's own
/// status code and message; only transport faults are hidden behind a
/// 500.
pub(crate) fn into_status_error(error: TrackingError) -> StatusError {
    match error {
        TrackingError::Upstream { status, message } => {
            // Relay whatever error status the carrier answered with. A
            // code that is not a valid HTTP error (a 3xx, say) cannot be
            // represented, so it degrades to 502 with the code in the
            // message.
            StatusCode::from_u16(status)
                .ok()
                .and_then(StatusError::from_code)
                .unwrap_or_else(StatusError::bad_gateway)
                .brief(format!("Carrier returned status {status}: {message}"))
        }
        TrackingError::UnexpectedResponse(message) => {
            StatusError::bad_request().brief(format!("Unexpected response from carrier: {message}"))
        }
        TrackingError::Http(error) => {
            tracing::error!("carrier request failed: {error}");

            StatusError::internal_server_error()
        }
    }
}
