//! Cart Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    accounts::UserUuid,
    carts::models::{AddItem, CartItem, CartItemUuid, CartLine, CartUuid},
    products::ProductUuid,
    products::repository::try_get_amount,
};

const LIST_CART_LINES_SQL: &str = include_str!("../sql/list_cart_lines.sql");
const FIND_MERGEABLE_ITEM_SQL: &str = include_str!("../sql/find_mergeable_item.sql");
const ADD_ITEM_QUANTITY_SQL: &str = include_str!("../sql/add_item_quantity.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const DELETE_OWNED_ITEM_SQL: &str = include_str!("../sql/delete_owned_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(LIST_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Find the line this request would merge into: same product, and
    /// color and size equal with `NULL` treated as a plain value.
    pub(crate) async fn find_mergeable_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &AddItem,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(FIND_MERGEABLE_ITEM_SQL)
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(&item.color)
            .bind(&item.size)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn add_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        delta: i32,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(ADD_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(delta)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CartItemUuid,
        cart: CartUuid,
        item: &AddItem,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Postgres, CartItem>(CREATE_CART_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(cart.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.quantity)
            .bind(&item.color)
            .bind(&item.size)
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete a line only when it sits in an active cart owned by `user`.
    /// Returns the number of rows deleted.
    pub(crate) async fn delete_owned_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_OWNED_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: row.try_get("quantity")?,
            color: row.try_get("color")?,
            size: row.try_get("size")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            item_uuid: CartItemUuid::from_uuid(row.try_get("item_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: row.try_get("quantity")?,
            color: row.try_get("color")?,
            size: row.try_get("size")?,
            title: row.try_get("title")?,
            unit_price: try_get_amount(row, "price")?,
            image_url: row.try_get("image_url")?,
        })
    }
}
