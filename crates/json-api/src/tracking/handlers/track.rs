//! Track Shipment Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use serde::{Deserialize, Serialize};

use vitrine_app::tracking::{Carrier, TrackingEvent};

use crate::{extensions::*, state::State, tracking::errors::into_status_error};

/// Tracking Event Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackingEventResponse {
    pub status: String,
    pub description: String,
    pub location: Option<String>,
    /// Carrier-local timestamp, passed through verbatim.
    pub timestamp: String,
}

impl From<TrackingEvent> for TrackingEventResponse {
    fn from(event: TrackingEvent) -> Self {
        Self {
            status: event.status,
            description: event.description,
            location: event.location,
            timestamp: event.timestamp,
        }
    }
}

/// Track Shipment Handler
#[endpoint(
    tags("tracking"),
    summary = "Fetch carrier scan history for a tracking number",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Scan history"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown carrier or carrier-side failure"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    carrier: QueryParam<String, false>,
    tracking_number: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<TrackingEventResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let carrier = carrier
        .into_inner()
        .as_deref()
        .and_then(Carrier::from_tag)
        .ok_or_else(|| StatusError::bad_request().brief("Unknown carrier"))?;

    let tracking_number = tracking_number
        .into_inner()
        .filter(|number| !number.trim().is_empty())
        .ok_or_else(|| StatusError::bad_request().brief("Missing tracking number"))?;

    let events = state
        .app
        .tracking
        .track(carrier, &tracking_number)
        .await
        .map_err(into_status_error)?;

    Ok(Json(events.into_iter().map(Into::into).collect()))
}
