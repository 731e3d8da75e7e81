//! Direct Charge Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::checkout::{CheckoutReceipt, PaymentInstrument};

use crate::{checkout::errors::into_status_error, extensions::*, state::State};

/// Charge Checkout Request
///
/// Exactly one of `token` (card) or `source` (PromptPay QR) must be
/// present.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChargeCheckoutRequest {
    /// One-time card token from the provider's browser SDK
    pub token: Option<String>,

    /// PromptPay source id
    pub source: Option<String>,
}

impl ChargeCheckoutRequest {
    fn into_instrument(self) -> Result<PaymentInstrument, StatusError> {
        match (self.token, self.source) {
            (Some(token), None) => Ok(PaymentInstrument::CardToken(token)),
            (None, Some(source)) => Ok(PaymentInstrument::PromptPaySource(source)),
            _ => Err(StatusError::bad_request()
                .brief("Provide exactly one of \"token\" or \"source\"")),
        }
    }
}

/// Checkout Receipt Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptResponse {
    pub order_uuid: Uuid,

    /// `paid` or `pending`
    pub status: String,

    /// Charged total in minor units
    pub amount: u64,

    pub charge_id: String,

    /// Authorization page for 3-D Secure or source confirmation
    pub authorize_uri: Option<String>,

    /// Scannable QR image for pending PromptPay charges
    pub qr_image_uri: Option<String>,
}

impl From<CheckoutReceipt> for ReceiptResponse {
    fn from(receipt: CheckoutReceipt) -> Self {
        Self {
            order_uuid: receipt.order_uuid.into_uuid(),
            status: receipt.status.as_str().to_string(),
            amount: receipt.amount.minor(),
            charge_id: receipt.charge_id,
            authorize_uri: receipt.authorize_uri,
            qr_image_uri: receipt.qr_image_uri,
        }
    }
}

/// Direct Charge Checkout Handler
#[endpoint(
    tags("checkout"),
    summary = "Charge the active cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or payment failed"),
        (status_code = StatusCode::CONFLICT, description = "Cart already checked out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ChargeCheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<ReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let instrument = json.into_inner().into_instrument()?;

    let receipt = state
        .app
        .checkout
        .checkout(user, instrument)
        .await
        .map_err(into_status_error)?;

    Ok(Json(receipt.into()))
}
