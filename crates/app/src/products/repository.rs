//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use vitrine::Amount;

use crate::products::models::{NewProduct, Product, ProductUuid};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ProductUuid,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(uuid.into_uuid())
            .bind(&product.title)
            .bind(&product.description)
            .bind(amount_to_db(product.price))
            .bind(product.original_price.map(amount_to_db))
            .bind(product.discount_percent)
            .bind(product.rating)
            .bind(&product.image_url)
            .bind(&product.category)
            .bind(&product.colors)
            .bind(&product.sizes)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            original_price: try_get_amount_opt(row, "original_price")?,
            discount_percent: row.try_get("discount_percent")?,
            rating: row.try_get("rating")?,
            image_url: row.try_get("image_url")?,
            category: row.try_get("category")?,
            colors: row.try_get("colors")?,
            sizes: row.try_get("sizes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

/// Decode a `BIGINT` minor-unit column into an [`Amount`].
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<Amount, sqlx::Error> {
    let minor: i64 = row.try_get(col)?;

    u64::try_from(minor)
        .map(Amount::from_minor)
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: col.to_string(),
            source: Box::new(e),
        })
}

/// Decode a nullable `BIGINT` minor-unit column.
pub(crate) fn try_get_amount_opt(row: &PgRow, col: &str) -> Result<Option<Amount>, sqlx::Error> {
    let minor: Option<i64> = row.try_get(col)?;

    minor
        .map(|minor| {
            u64::try_from(minor)
                .map(Amount::from_minor)
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: col.to_string(),
                    source: Box::new(e),
                })
        })
        .transpose()
}

/// Encode an [`Amount`] for a `BIGINT` column, saturating at `i64::MAX`.
pub(crate) fn amount_to_db(amount: Amount) -> i64 {
    i64::try_from(amount.minor()).unwrap_or(i64::MAX)
}
