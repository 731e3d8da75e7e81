//! List Orders Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::orders::{OrderItem, OrderWithItems};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    /// Unit price in minor units, as charged at checkout time.
    pub unit_price: u64,
    pub quantity: i32,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_uuid: item.product_uuid.into_uuid(),
            title: item.title,
            image_url: item.image_url,
            unit_price: item.unit_price.minor(),
            quantity: item.quantity,
            color: item.color,
            size: item.size,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    /// Charged total in minor units.
    pub amount: u64,
    pub status: String,
    pub payment_method: String,
    pub charge_id: String,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderWithItems> for OrderResponse {
    fn from(entry: OrderWithItems) -> Self {
        Self {
            uuid: entry.order.uuid.into_uuid(),
            amount: entry.order.amount.minor(),
            status: entry.order.status.as_str().to_string(),
            payment_method: entry.order.payment_method.as_str().to_string(),
            charge_id: entry.order.charge_id,
            carrier: entry.order.carrier,
            tracking_number: entry.order.tracking_number,
            created_at: entry.order.created_at.to_string(),
            items: entry.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// List Orders Handler
#[endpoint(
    tags("orders"),
    summary = "List the authenticated user's orders, newest first",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order history"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
