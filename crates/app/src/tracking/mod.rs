//! Shipment tracking proxy.

pub mod errors;
mod thailand_post;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;

pub use errors::TrackingError;
pub use thailand_post::{ThailandPostClient, ThailandPostConfig};

/// Supported shipping carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carrier {
    ThailandPost,
}

impl Carrier {
    /// Parse the carrier tag stored on orders and sent by clients.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "thailand_post" | "thaipost" => Some(Self::ThailandPost),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThailandPost => "thailand_post",
        }
    }
}

/// One normalized tracking scan.
///
/// The upstream timestamp is passed through verbatim; carriers use
/// local calendars and formats we do not reinterpret.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingEvent {
    pub status: String,
    pub description: String,
    pub location: Option<String>,
    pub timestamp: String,
}

#[automock]
#[async_trait]
pub trait TrackingService: Send + Sync {
    /// Fetch the scan history for one tracking number, oldest first as
    /// reported by the carrier.
    async fn track(
        &self,
        carrier: Carrier,
        tracking_number: &str,
    ) -> Result<Vec<TrackingEvent>, TrackingError>;
}
