//! Redirect Checkout Creation Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use vitrine_app::checkout::RedirectUrls;

use crate::{checkout::errors::into_status_error, extensions::*, state::State};

/// Redirect Checkout Response
///
/// No order exists locally until the capture call; abandoning the
/// approval page leaves the cart untouched.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RedirectCheckoutResponse {
    pub provider_order_id: String,
    pub status: String,
    /// Where to send the customer to approve payment
    pub approval_url: Option<String>,
}

/// Redirect Checkout Creation Handler
#[endpoint(
    tags("checkout"),
    summary = "Open a redirect payment for the active cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Provider order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RedirectCheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let urls = RedirectUrls {
        return_url: format!("{}/checkout/redirect/capture", state.public_base_url),
        cancel_url: format!("{}/checkout", state.public_base_url),
    };

    let pending = state
        .app
        .checkout
        .begin_redirect(user, urls)
        .await
        .map_err(into_status_error)?;

    Ok(Json(RedirectCheckoutResponse {
        provider_order_id: pending.provider_order_id,
        status: pending.status,
        approval_url: pending.approval_url,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use vitrine_app::checkout::{CheckoutError, MockCheckoutService, RedirectCheckout};

    use crate::test_helpers::{TEST_USER_UUID, checkout_service};

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(checkout, Router::with_path("checkout/redirect").post(handler))
    }

    #[tokio::test]
    async fn test_redirect_create_returns_approval_url() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_begin_redirect()
            .once()
            .withf(|user, urls| {
                *user == TEST_USER_UUID
                    && urls.return_url.ends_with("/checkout/redirect/capture")
            })
            .return_once(|_, _| {
                Ok(RedirectCheckout {
                    provider_order_id: "5O190127TN364715T".to_string(),
                    status: "CREATED".to_string(),
                    approval_url: Some("https://provider.example/approve".to_string()),
                })
            });

        let mut res = TestClient::post("http://example.com/checkout/redirect")
            .send(&make_service(checkout))
            .await;

        let body: RedirectCheckoutResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.provider_order_id, "5O190127TN364715T");
        assert_eq!(
            body.approval_url.as_deref(),
            Some("https://provider.example/approve")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_400() -> TestResult {
        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_begin_redirect()
            .once()
            .return_once(|_, _| Err(CheckoutError::EmptyCart));

        let res = TestClient::post("http://example.com/checkout/redirect")
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
