//! Redirect Capture Handlers
//!
//! Capture has two entry points: the browser callback the provider
//! redirects to after approval, and an explicit JSON call for clients
//! that drive the flow themselves. Both capture the same provider
//! order; whichever lands second finds the cart already completed.

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, QueryParam},
    prelude::*,
    writing::Redirect,
};
use serde::{Deserialize, Serialize};

use crate::{
    checkout::{errors::into_status_error, handlers::charge::ReceiptResponse},
    extensions::*,
    state::State,
};

/// Capture Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CaptureRequest {
    pub provider_order_id: String,
}

/// Redirect Capture Handler (JSON)
#[endpoint(
    tags("checkout"),
    summary = "Capture an approved redirect payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Capture incomplete or cart empty"),
        (status_code = StatusCode::CONFLICT, description = "Cart already checked out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CaptureRequest>,
    depot: &mut Depot,
) -> Result<Json<ReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let receipt = state
        .app
        .checkout
        .capture_redirect(user, &json.into_inner().provider_order_id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(receipt.into()))
}

/// Redirect Capture Callback Handler (browser)
///
/// The provider appends the order id as the `token` query parameter.
/// The outcome is reported by redirecting the browser, not by status
/// codes.
#[endpoint(
    tags("checkout"),
    summary = "Provider return callback for redirect payments",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn callback_handler(
    token: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let Some(provider_order_id) = token.into_inner().filter(|token| !token.is_empty()) else {
        res.render(Redirect::other("/checkout?error=missing_token"));

        return Ok(());
    };

    match state
        .app
        .checkout
        .capture_redirect(user, &provider_order_id)
        .await
    {
        Ok(receipt) => {
            res.render(Redirect::other(format!(
                "/orders?checkout=success&order={}",
                receipt.order_uuid
            )));
        }
        Err(error) => {
            tracing::warn!("redirect capture failed: {error}");

            res.render(Redirect::other("/checkout?error=payment_failed"));
        }
    }

    Ok(())
}
