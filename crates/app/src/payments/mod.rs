//! Payment provider clients.
//!
//! Two shapes of payment are supported. A [`ChargeGateway`] settles in a
//! single call using an instrument the client already tokenized. A
//! [`RedirectGateway`] splits payment into an approval redirect followed
//! by an explicit capture call.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use vitrine::Amount;

mod omise;
mod paypal;

pub use omise::{OmiseClient, OmiseConfig};
pub use paypal::{PayPalClient, PayPalConfig};

/// Errors that can occur when talking to a payment provider.
#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("payment provider request failed")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success response with a message.
    #[error("payment provider rejected the request: {0}")]
    Rejected(String),

    /// The provider answered with a body we could not interpret.
    #[error("unexpected response from payment provider: {0}")]
    UnexpectedResponse(String),
}

/// A single-call charge request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    /// Charge total in minor units.
    pub amount: Amount,
    /// ISO 4217 currency code, lowercased per provider convention.
    pub currency: String,
    pub instrument: ChargeInstrument,
    pub description: String,
}

/// Client-side tokenized payment instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeInstrument {
    /// One-time card token minted by the provider's browser SDK.
    CardToken(String),
    /// Payment source id, e.g. a PromptPay QR source.
    SourceId(String),
}

/// Provider-reported state of a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    Successful,
    Pending,
    Failed,
}

/// Result of a direct charge.
#[derive(Debug, Clone)]
pub struct Charge {
    pub id: String,
    pub status: ChargeStatus,
    /// 3-D Secure or source authorization page, when the provider wants
    /// the customer redirected.
    pub authorize_uri: Option<String>,
    /// Scannable QR image for offline sources.
    pub qr_image_uri: Option<String>,
    pub failure_message: Option<String>,
}

/// Request to open a redirect-approved order with the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectOrderRequest {
    /// Order total in minor units.
    pub total: Amount,
    /// ISO 4217 currency code, uppercased per provider convention.
    pub currency_code: String,
    pub return_url: String,
    pub cancel_url: String,
}

/// A provider-side order awaiting customer approval.
#[derive(Debug, Clone)]
pub struct ProviderOrder {
    pub id: String,
    pub status: String,
    /// Where to send the customer to approve payment.
    pub approval_url: Option<String>,
}

/// State of a capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStatus {
    Completed,
    Other(String),
}

/// Result of capturing a provider order.
#[derive(Debug, Clone)]
pub struct Capture {
    pub id: String,
    pub status: CaptureStatus,
}

#[automock]
#[async_trait]
pub trait ChargeGateway: Send + Sync {
    /// Submit a charge and report the provider's verdict.
    ///
    /// A declined charge is a successful call with `ChargeStatus::Failed`,
    /// not an `Err`.
    async fn create_charge(&self, request: ChargeRequest) -> Result<Charge, PaymentGatewayError>;
}

#[automock]
#[async_trait]
pub trait RedirectGateway: Send + Sync {
    /// Open a provider order and obtain the customer approval link.
    async fn create_order(
        &self,
        request: RedirectOrderRequest,
    ) -> Result<ProviderOrder, PaymentGatewayError>;

    /// Capture an approved provider order.
    async fn capture_order(&self, provider_order_id: &str)
    -> Result<Capture, PaymentGatewayError>;
}
