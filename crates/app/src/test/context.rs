//! Test context for service-level integration tests.

use vitrine::Amount;

use crate::{
    accounts::{AccountsService, NewAccount, PgAccountsService, UserUuid},
    carts::PgCartsService,
    database::Db,
    orders::PgOrdersService,
    products::{NewProduct, PgProductsService, Product, ProductsService},
    sessions::PgSessionsService,
};

use super::db::TestDb;

/// Real services wired to an isolated per-test database.
pub(crate) struct TestContext {
    pub(crate) accounts: PgAccountsService,
    pub(crate) sessions: PgSessionsService,
    pub(crate) products: PgProductsService,
    pub(crate) carts: PgCartsService,
    pub(crate) orders: PgOrdersService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool.clone());

        Self {
            accounts: PgAccountsService::new(db.clone()),
            sessions: PgSessionsService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db),
        }
    }

    /// Register a throwaway customer and return their uuid.
    pub(crate) async fn create_user(&self, email: &str) -> UserUuid {
        self.accounts
            .register(NewAccount {
                email: email.to_string(),
                name: "Test Shopper".to_string(),
                password: "correct horse battery staple".to_string(),
            })
            .await
            .expect("Failed to register test user")
            .uuid
    }

    /// Seed a catalogue product with the given unit price in minor units.
    pub(crate) async fn create_product(&self, title: &str, price: u64) -> Product {
        self.products
            .create_product(NewProduct {
                title: title.to_string(),
                description: None,
                price: Amount::from_minor(price),
                original_price: None,
                discount_percent: None,
                rating: None,
                image_url: None,
                category: None,
                colors: vec!["navy".to_string(), "olive".to_string()],
                sizes: vec!["m".to_string(), "l".to_string()],
            })
            .await
            .expect("Failed to create test product")
    }
}
