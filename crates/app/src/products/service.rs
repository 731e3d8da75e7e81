//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, uuid: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::generate(), &product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn count_products(&self) -> Result<i64, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_products(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List the whole catalogue, oldest first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, uuid: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Creates a new product with the given details.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Number of products in the catalogue.
    async fn count_products(&self) -> Result<i64, ProductsServiceError>;
}
