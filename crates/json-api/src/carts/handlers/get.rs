//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitrine::PricedLine;

use vitrine_app::carts::{ActiveCart, CartLine};

use crate::{extensions::*, state::State};

/// Cart Response
///
/// An absent active cart is a valid, empty response rather than a 404.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Active cart UUID, absent when the user has no active cart
    pub uuid: Option<Uuid>,

    /// The lines in the cart
    pub lines: Vec<CartLineResponse>,

    /// Price summary; absent when the cart has nothing priceable
    pub summary: Option<QuoteResponse>,
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Cart line UUID, used for removal
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub title: String,
    /// Unit price in minor units
    pub unit_price: u64,
    pub quantity: i32,
    pub color: Option<String>,
    pub size: Option<String>,
    pub image_url: Option<String>,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            uuid: line.item_uuid.into_uuid(),
            product_uuid: line.product_uuid.into_uuid(),
            title: line.title,
            unit_price: line.unit_price.minor(),
            quantity: line.quantity,
            color: line.color,
            size: line.size,
            image_url: line.image_url,
        }
    }
}

/// Quote Response, all values in minor units
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    pub subtotal: u64,
    pub discount: u64,
    pub delivery_fee: u64,
    pub total: u64,
}

impl From<vitrine::Quote> for QuoteResponse {
    fn from(quote: vitrine::Quote) -> Self {
        Self {
            subtotal: quote.subtotal.minor(),
            discount: quote.discount.minor(),
            delivery_fee: quote.delivery_fee.minor(),
            total: quote.total.minor(),
        }
    }
}

impl From<Option<ActiveCart>> for CartResponse {
    fn from(cart: Option<ActiveCart>) -> Self {
        let Some(cart) = cart else {
            return Self {
                uuid: None,
                lines: Vec::new(),
                summary: None,
            };
        };

        let summary = priced_lines(&cart.lines)
            .and_then(|lines| vitrine::quote(&lines).ok())
            .map(QuoteResponse::from);

        Self {
            uuid: Some(cart.cart.uuid.into_uuid()),
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            summary,
        }
    }
}

fn priced_lines(lines: &[CartLine]) -> Option<Vec<PricedLine>> {
    lines
        .iter()
        .map(|line| {
            u32::try_from(line.quantity)
                .ok()
                .filter(|quantity| *quantity > 0)
                .map(|quantity| PricedLine {
                    unit_price: line.unit_price,
                    quantity,
                })
        })
        .collect()
}

/// Get Cart Handler
///
/// Returns the caller's active cart with a live price summary.
#[endpoint(
    tags("cart"),
    summary = "Get the active cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_active_cart(user)
        .await
        .map_err(crate::carts::errors::into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use vitrine_app::carts::MockCartsService;

    use crate::test_helpers::{TEST_USER_UUID, carts_service, make_active_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_no_active_cart_returns_empty_response() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_active_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(None));

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, None);
        assert!(body.lines.is_empty());
        assert!(body.summary.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_active_cart_carries_price_summary() -> TestResult {
        let cart = make_active_cart(TEST_USER_UUID, 10_000, 1);
        let cart_uuid = cart.cart.uuid.into_uuid();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_active_cart()
            .once()
            .return_once(move |_| Ok(Some(cart)));

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.uuid, Some(cart_uuid));
        assert_eq!(body.lines.len(), 1);

        let summary = body.summary.ok_or("missing summary")?;

        assert_eq!(summary.subtotal, 10_000);
        assert_eq!(summary.discount, 2_000);
        assert_eq!(summary.delivery_fee, 1_500);
        assert_eq!(summary.total, 9_500);

        Ok(())
    }
}
