//! Thailand Post tracking client.
//!
//! The dashboard API key is exchanged for a short-lived access token,
//! which then authorizes the actual track call. Tokens are fetched per
//! request rather than cached.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::tracking::{Carrier, TrackingError, TrackingEvent, TrackingService};

/// Configuration for the Thailand Post Track API.
#[derive(Debug, Clone)]
pub struct ThailandPostConfig {
    /// Long-lived dashboard API key.
    pub api_key: String,

    /// API base, e.g. `"https://trackapi.thailandpost.co.th/post/api/v1"`.
    pub api_base: String,
}

/// HTTP client for Thailand Post tracking.
#[derive(Debug, Clone)]
pub struct ThailandPostClient {
    config: ThailandPostConfig,
    http: Client,
}

impl ThailandPostClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ThailandPostConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn fetch_access_token(&self) -> Result<String, TrackingError> {
        let url = format!("{}/authenticate/token", self.config.api_base);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Token {}", self.config.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(TrackingError::Upstream { status, message });
        }

        let parsed: TokenResponse = response.json().await?;

        Ok(parsed.token)
    }
}

#[async_trait]
impl TrackingService for ThailandPostClient {
    async fn track(
        &self,
        _carrier: Carrier,
        tracking_number: &str,
    ) -> Result<Vec<TrackingEvent>, TrackingError> {
        let access_token = self.fetch_access_token().await?;
        let url = format!("{}/track", self.config.api_base);

        let body = serde_json::json!({
            "status": "all",
            "language": "EN",
            "barcode": [tracking_number],
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Token {access_token}"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(TrackingError::Upstream { status, message });
        }

        let parsed: TrackResponse = response.json().await?;

        let scans = parsed
            .response
            .items
            .get(tracking_number)
            .cloned()
            .ok_or_else(|| {
                TrackingError::UnexpectedResponse(format!(
                    "carrier response is missing barcode {tracking_number:?}"
                ))
            })?;

        Ok(scans.into_iter().map(TrackingEvent::from).collect())
    }
}

impl From<RawScan> for TrackingEvent {
    fn from(scan: RawScan) -> Self {
        Self {
            status: scan.status,
            description: scan.status_description,
            location: scan.location.filter(|location| !location.is_empty()),
            timestamp: scan.status_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct TrackResponse {
    response: TrackItems,
}

#[derive(Debug, Deserialize)]
struct TrackItems {
    items: HashMap<String, Vec<RawScan>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawScan {
    status: String,
    status_description: String,
    status_date: String,
    #[serde(default)]
    location: Option<String>,
}
