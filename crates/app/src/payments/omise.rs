//! Omise charge client.
//!
//! Charges are created with a single authenticated form POST. Card
//! payments send a one-time `card` token, PromptPay payments send a
//! `source` id and come back `pending` with a scannable QR image.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::payments::{
    Charge, ChargeGateway, ChargeInstrument, ChargeRequest, ChargeStatus, PaymentGatewayError,
};

/// Configuration for the Omise API.
#[derive(Debug, Clone)]
pub struct OmiseConfig {
    /// Secret API key, used as the basic-auth username.
    pub secret_key: String,

    /// API base, e.g. `"https://api.omise.co"`.
    pub api_base: String,
}

/// HTTP client for Omise charge operations.
#[derive(Debug, Clone)]
pub struct OmiseClient {
    config: OmiseConfig,
    http: Client,
}

impl OmiseClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: OmiseConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ChargeGateway for OmiseClient {
    async fn create_charge(&self, request: ChargeRequest) -> Result<Charge, PaymentGatewayError> {
        let url = format!("{}/charges", self.config.api_base);

        let mut form = vec![
            ("amount", request.amount.minor().to_string()),
            ("currency", request.currency.clone()),
            ("description", request.description.clone()),
        ];

        match &request.instrument {
            ChargeInstrument::CardToken(token) => form.push(("card", token.clone())),
            ChargeInstrument::SourceId(source) => form.push(("source", source.clone())),
        }

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.secret_key, Some(""))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<OmiseErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| format!("charge request failed with status {status}"));

            return Err(PaymentGatewayError::Rejected(message));
        }

        let parsed: OmiseCharge = response.json().await?;

        let status = match parsed.status.as_str() {
            "successful" => ChargeStatus::Successful,
            "pending" => ChargeStatus::Pending,
            "failed" => ChargeStatus::Failed,
            other => {
                return Err(PaymentGatewayError::UnexpectedResponse(format!(
                    "unknown charge status {other:?}"
                )));
            }
        };

        Ok(Charge {
            id: parsed.id,
            status,
            authorize_uri: parsed.authorize_uri,
            qr_image_uri: parsed
                .source
                .and_then(|source| source.scannable_code)
                .map(|code| code.image.download_uri),
            failure_message: parsed.failure_message,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmiseCharge {
    id: String,
    status: String,
    authorize_uri: Option<String>,
    failure_message: Option<String>,
    source: Option<OmiseSource>,
}

#[derive(Debug, Deserialize)]
struct OmiseSource {
    scannable_code: Option<OmiseScannableCode>,
}

#[derive(Debug, Deserialize)]
struct OmiseScannableCode {
    image: OmiseImage,
}

#[derive(Debug, Deserialize)]
struct OmiseImage {
    download_uri: String,
}

#[derive(Debug, Deserialize)]
struct OmiseErrorBody {
    message: String,
}
