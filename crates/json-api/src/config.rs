//! Server configuration module

use clap::Parser;
use vitrine_app::{
    context::ProviderConfig,
    payments::{OmiseConfig, PayPalConfig},
    tracking::ThailandPostConfig,
};

/// Vitrine JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "vitrine-json", about = "Vitrine JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Public base URL used to build payment return links
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = "http://localhost:8698")]
    pub public_base_url: String,

    /// Omise secret API key
    #[arg(long, env = "OMISE_SECRET_KEY", hide_env_values = true)]
    pub omise_secret_key: String,

    /// Omise API base URL
    #[arg(long, env = "OMISE_API_BASE", default_value = "https://api.omise.co")]
    pub omise_api_base: String,

    /// `PayPal` REST client id
    #[arg(long, env = "PAYPAL_CLIENT_ID")]
    pub paypal_client_id: String,

    /// `PayPal` REST client secret
    #[arg(long, env = "PAYPAL_CLIENT_SECRET", hide_env_values = true)]
    pub paypal_client_secret: String,

    /// `PayPal` API base URL
    #[arg(
        long,
        env = "PAYPAL_API_BASE",
        default_value = "https://api-m.sandbox.paypal.com"
    )]
    pub paypal_api_base: String,

    /// Storefront name shown on the `PayPal` approval page
    #[arg(long, env = "PAYPAL_BRAND_NAME", default_value = "Vitrine")]
    pub paypal_brand_name: String,

    /// Thailand Post dashboard API key
    #[arg(long, env = "THAILAND_POST_API_KEY", hide_env_values = true)]
    pub thailand_post_api_key: String,

    /// Thailand Post API base URL
    #[arg(
        long,
        env = "THAILAND_POST_API_BASE",
        default_value = "https://trackapi.thailandpost.co.th/post/api/v1"
    )]
    pub thailand_post_api_base: String,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Payment and tracking provider configuration
    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            omise: OmiseConfig {
                secret_key: self.omise_secret_key.clone(),
                api_base: self.omise_api_base.clone(),
            },
            paypal: PayPalConfig {
                client_id: self.paypal_client_id.clone(),
                client_secret: self.paypal_client_secret.clone(),
                api_base: self.paypal_api_base.clone(),
                brand_name: self.paypal_brand_name.clone(),
            },
            thailand_post: ThailandPostConfig {
                api_key: self.thailand_post_api_key.clone(),
                api_base: self.thailand_post_api_base.clone(),
            },
        }
    }
}
