//! PayPal redirect client.
//!
//! Every call fetches a client-credentials access token first, then
//! drives the two-phase order flow: create an order carrying the
//! approval link, capture it after the customer returns.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::payments::{
    Capture, CaptureStatus, PaymentGatewayError, ProviderOrder, RedirectGateway,
    RedirectOrderRequest,
};

/// Configuration for the PayPal REST API.
#[derive(Debug, Clone)]
pub struct PayPalConfig {
    pub client_id: String,
    pub client_secret: String,

    /// API base, e.g. `"https://api-m.sandbox.paypal.com"`.
    pub api_base: String,

    /// Storefront name shown on the approval page.
    pub brand_name: String,
}

/// HTTP client for the PayPal order flow.
#[derive(Debug, Clone)]
pub struct PayPalClient {
    config: PayPalConfig,
    http: Client,
}

impl PayPalClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: PayPalConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn fetch_access_token(&self) -> Result<String, PaymentGatewayError> {
        let url = format!("{}/v1/oauth2/token", self.config.api_base);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentGatewayError::UnexpectedResponse(format!(
                "token request failed with status {status}: {text}"
            )));
        }

        let parsed: TokenResponse = response.json().await?;

        Ok(parsed.access_token)
    }
}

#[async_trait]
impl RedirectGateway for PayPalClient {
    async fn create_order(
        &self,
        request: RedirectOrderRequest,
    ) -> Result<ProviderOrder, PaymentGatewayError> {
        let access_token = self.fetch_access_token().await?;
        let url = format!("{}/v2/checkout/orders", self.config.api_base);

        let body = serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": request.currency_code,
                    "value": request.total.to_major().to_string(),
                },
            }],
            "application_context": {
                "brand_name": self.config.brand_name,
                "landing_page": "LOGIN",
                "user_action": "PAY_NOW",
                "return_url": request.return_url,
                "cancel_url": request.cancel_url,
            },
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentGatewayError::Rejected(format!(
                "order create failed with status {status}: {text}"
            )));
        }

        let parsed: OrderResponse = response.json().await?;

        let approval_url = parsed
            .links
            .into_iter()
            .find(|link| link.rel == "approve")
            .map(|link| link.href);

        Ok(ProviderOrder {
            id: parsed.id,
            status: parsed.status,
            approval_url,
        })
    }

    async fn capture_order(
        &self,
        provider_order_id: &str,
    ) -> Result<Capture, PaymentGatewayError> {
        let access_token = self.fetch_access_token().await?;
        let url = format!(
            "{}/v2/checkout/orders/{provider_order_id}/capture",
            self.config.api_base
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentGatewayError::Rejected(format!(
                "order capture failed with status {status}: {text}"
            )));
        }

        let parsed: CaptureResponse = response.json().await?;

        let status = match parsed.status.as_str() {
            "COMPLETED" => CaptureStatus::Completed,
            other => CaptureStatus::Other(other.to_string()),
        };

        Ok(Capture {
            id: parsed.id,
            status,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    status: String,
    #[serde(default)]
    links: Vec<OrderLink>,
}

#[derive(Debug, Deserialize)]
struct OrderLink {
    rel: String,
    href: String,
}

#[derive(Debug, Deserialize)]
struct CaptureResponse {
    id: String,
    status: String,
}
