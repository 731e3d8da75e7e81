//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    accounts::UserUuid,
    orders::models::{
        NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderUuid, PaymentMethod,
    },
    orders::models::OrderItemUuid,
    products::ProductUuid,
    products::repository::{amount_to_db, try_get_amount},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
        user: UserUuid,
        order: &NewOrder,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(amount_to_db(order.amount))
            .bind(order.status.as_str())
            .bind(order.payment_method.as_str())
            .bind(&order.charge_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &NewOrderItem,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::generate().into_uuid())
            .bind(order.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.quantity)
            .bind(amount_to_db(item.unit_price))
            .bind(&item.color)
            .bind(&item.size)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|o| o.into_uuid()).collect();

        query_as::<Postgres, OrderItem>(LIST_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            amount: try_get_amount(row, "amount")?,
            status: decode_status(row)?,
            payment_method: decode_payment_method(row)?,
            charge_id: row.try_get("charge_id")?,
            carrier: row.try_get("carrier")?,
            tracking_number: row.try_get("tracking_number")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: row.try_get("quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            color: row.try_get("color")?,
            size: row.try_get("size")?,
            title: row.try_get("title")?,
            image_url: row.try_get("image_url")?,
        })
    }
}

fn decode_status(row: &PgRow) -> sqlx::Result<OrderStatus> {
    let status: &str = row.try_get("status")?;

    match status {
        "pending" => Ok(OrderStatus::Pending),
        "paid" => Ok(OrderStatus::Paid),
        "failed" => Ok(OrderStatus::Failed),
        "completed" => Ok(OrderStatus::Completed),
        other => Err(sqlx::Error::ColumnDecode {
            index: "status".to_string(),
            source: format!("unknown order status {other:?}").into(),
        }),
    }
}

fn decode_payment_method(row: &PgRow) -> sqlx::Result<PaymentMethod> {
    let method: &str = row.try_get("payment_method")?;

    match method {
        "credit_card" => Ok(PaymentMethod::CreditCard),
        "promptpay" => Ok(PaymentMethod::PromptPay),
        "paypal" => Ok(PaymentMethod::PayPal),
        other => Err(sqlx::Error::ColumnDecode {
            index: "payment_method".to_string(),
            source: format!("unknown payment method {other:?}").into(),
        }),
    }
}
