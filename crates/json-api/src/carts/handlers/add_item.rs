//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::{carts::AddItem, products::ProductUuid};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub product_uuid: Uuid,
    /// Quantity delta; merged into an existing line with the same
    /// product, color, and size
    pub quantity: i32,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl From<AddItemRequest> for AddItem {
    fn from(request: AddItemRequest) -> Self {
        AddItem {
            product_uuid: ProductUuid::from_uuid(request.product_uuid),
            quantity: request.quantity,
            color: request.color,
            size: request.size,
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub cart_uuid: Uuid,
    pub product_uuid: Uuid,
    /// Quantity after merging
    pub quantity: i32,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add an item to the active cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let item = state
        .app
        .carts
        .add_item(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CartItemResponse {
        uuid: item.uuid.into_uuid(),
        cart_uuid: item.cart_uuid.into_uuid(),
        product_uuid: item.product_uuid.into_uuid(),
        quantity: item.quantity,
        color: item.color,
        size: item.size,
    }))
}
