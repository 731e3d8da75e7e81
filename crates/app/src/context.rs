//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    accounts::{AccountsService, PgAccountsService},
    carts::{CartsService, PgCartsService},
    checkout::{CheckoutOrchestrator, CheckoutService},
    database::{self, Db},
    orders::{OrdersService, PgOrdersService},
    payments::{OmiseClient, OmiseConfig, PayPalClient, PayPalConfig},
    products::{PgProductsService, ProductsService},
    sessions::{PgSessionsService, SessionsService},
    tracking::{ThailandPostClient, ThailandPostConfig, TrackingService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// External provider configuration for the full context.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub omise: OmiseConfig,
    pub paypal: PayPalConfig,
    pub thailand_post: ThailandPostConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub sessions: Arc<dyn SessionsService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub tracking: Arc<dyn TrackingService>,
}

impl AppContext {
    /// Build application context from a database URL and provider
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        providers: ProviderConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let carts: Arc<dyn CartsService> = Arc::new(PgCartsService::new(db.clone()));
        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db.clone()));

        let checkout = CheckoutOrchestrator::new(
            Arc::clone(&carts),
            Arc::clone(&orders),
            Arc::new(OmiseClient::new(providers.omise)),
            Arc::new(PayPalClient::new(providers.paypal)),
        );

        Ok(Self {
            accounts: Arc::new(PgAccountsService::new(db.clone())),
            sessions: Arc::new(PgSessionsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db)),
            carts,
            orders,
            checkout: Arc::new(checkout),
            tracking: Arc::new(ThailandPostClient::new(providers.thailand_post)),
        })
    }
}
