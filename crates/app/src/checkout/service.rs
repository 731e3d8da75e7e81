//! Checkout service.
//!
//! Both payment shapes share the same spine: load the active cart,
//! price it, settle with the provider, then record the order and
//! complete the cart in that fixed sequence. Nothing is written before
//! the provider has answered, so a declined charge leaves no trace.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use vitrine::{Amount, PricedLine};

use crate::{
    accounts::UserUuid,
    carts::{ActiveCart, CartsService},
    checkout::errors::CheckoutError,
    orders::{NewOrder, NewOrderItem, Order, OrderStatus, OrderUuid, OrdersService, PaymentMethod},
    payments::{
        CaptureStatus, ChargeGateway, ChargeInstrument, ChargeRequest, ChargeStatus,
        RedirectGateway, RedirectOrderRequest,
    },
};

/// Currency for direct charges, in the provider's lowercase convention.
const CHARGE_CURRENCY: &str = "thb";

/// Currency for redirect orders, in the provider's uppercase convention.
const REDIRECT_CURRENCY: &str = "USD";

/// Payment instrument tokenized by the client before checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentInstrument {
    /// One-time card token.
    CardToken(String),
    /// PromptPay QR source id.
    PromptPaySource(String),
}

/// Return and cancel pages for a redirect flow.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectUrls {
    pub return_url: String,
    pub cancel_url: String,
}

/// What a settled checkout produced.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub order_uuid: OrderUuid,
    pub status: OrderStatus,
    pub amount: Amount,
    pub charge_id: String,
    pub authorize_uri: Option<String>,
    pub qr_image_uri: Option<String>,
}

/// A redirect flow that is waiting on customer approval.
///
/// No order exists locally yet; the ledger is only written at capture.
#[derive(Debug, Clone)]
pub struct RedirectCheckout {
    pub provider_order_id: String,
    pub status: String,
    pub approval_url: Option<String>,
}

pub struct CheckoutOrchestrator {
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersService>,
    charge_gateway: Arc<dyn ChargeGateway>,
    redirect_gateway: Arc<dyn RedirectGateway>,
}

impl CheckoutOrchestrator {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
        charge_gateway: Arc<dyn ChargeGateway>,
        redirect_gateway: Arc<dyn RedirectGateway>,
    ) -> Self {
        Self {
            carts,
            orders,
            charge_gateway,
            redirect_gateway,
        }
    }

    /// The user's active cart, rejecting carts with nothing to charge.
    async fn chargeable_cart(&self, user: UserUuid) -> Result<ActiveCart, CheckoutError> {
        let cart = self
            .carts
            .get_active_cart(user)
            .await?
            .ok_or(CheckoutError::EmptyCart)?;

        if cart.lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(cart)
    }

    /// Record the order and retire the cart it came from.
    async fn settle(
        &self,
        user: UserUuid,
        cart: &ActiveCart,
        order: NewOrder,
    ) -> Result<Order, CheckoutError> {
        let recorded = self
            .orders
            .record_order(user, order, snapshot_lines(cart))
            .await?;

        self.carts.complete_cart(cart.cart.uuid).await?;

        info!(user = %user, order = %recorded.uuid, "order recorded");

        Ok(recorded)
    }
}

#[async_trait]
impl CheckoutService for CheckoutOrchestrator {
    async fn checkout(
        &self,
        user: UserUuid,
        payment: PaymentInstrument,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let cart = self.chargeable_cart(user).await?;
        let quote = vitrine::quote(&priced_lines(&cart)?)?;

        let (instrument, payment_method) = match payment {
            PaymentInstrument::CardToken(token) => {
                (ChargeInstrument::CardToken(token), PaymentMethod::CreditCard)
            }
            PaymentInstrument::PromptPaySource(source) => {
                (ChargeInstrument::SourceId(source), PaymentMethod::PromptPay)
            }
        };

        let charge = self
            .charge_gateway
            .create_charge(ChargeRequest {
                amount: quote.total,
                currency: CHARGE_CURRENCY.to_string(),
                instrument,
                description: format!("storefront order for user {user}"),
            })
            .await?;

        let status = match charge.status {
            ChargeStatus::Successful => OrderStatus::Paid,
            ChargeStatus::Pending => OrderStatus::Pending,
            ChargeStatus::Failed => {
                return Err(CheckoutError::ChargeFailed(
                    charge
                        .failure_message
                        .unwrap_or_else(|| "charge declined".to_string()),
                ));
            }
        };

        let order = self
            .settle(
                user,
                &cart,
                NewOrder {
                    amount: quote.total,
                    status,
                    payment_method,
                    charge_id: charge.id,
                },
            )
            .await?;

        Ok(CheckoutReceipt {
            order_uuid: order.uuid,
            status: order.status,
            amount: order.amount,
            charge_id: order.charge_id,
            authorize_uri: charge.authorize_uri,
            qr_image_uri: charge.qr_image_uri,
        })
    }

    async fn begin_redirect(
        &self,
        user: UserUuid,
        urls: RedirectUrls,
    ) -> Result<RedirectCheckout, CheckoutError> {
        let cart = self.chargeable_cart(user).await?;
        let quote = vitrine::quote(&priced_lines(&cart)?)?;

        let provider_order = self
            .redirect_gateway
            .create_order(RedirectOrderRequest {
                total: quote.total,
                currency_code: REDIRECT_CURRENCY.to_string(),
                return_url: urls.return_url,
                cancel_url: urls.cancel_url,
            })
            .await?;

        Ok(RedirectCheckout {
            provider_order_id: provider_order.id,
            status: provider_order.status,
            approval_url: provider_order.approval_url,
        })
    }

    async fn capture_redirect(
        &self,
        user: UserUuid,
        provider_order_id: &str,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let capture = self.redirect_gateway.capture_order(provider_order_id).await?;

        match capture.status {
            CaptureStatus::Completed => {}
            CaptureStatus::Other(status) => {
                return Err(CheckoutError::CaptureIncomplete(status));
            }
        }

        // The total is requoted from the cart as it stands now. If the
        // cart changed between approval and capture, the recorded amount
        // follows the current cart, not the approved one.
        let cart = self.chargeable_cart(user).await?;
        let quote = vitrine::quote(&priced_lines(&cart)?)?;

        let order = self
            .settle(
                user,
                &cart,
                NewOrder {
                    amount: quote.total,
                    status: OrderStatus::Paid,
                    payment_method: PaymentMethod::PayPal,
                    charge_id: capture.id,
                },
            )
            .await?;

        Ok(CheckoutReceipt {
            order_uuid: order.uuid,
            status: order.status,
            amount: order.amount,
            charge_id: order.charge_id,
            authorize_uri: None,
            qr_image_uri: None,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Charge the active cart in one call and record the order.
    async fn checkout(
        &self,
        user: UserUuid,
        payment: PaymentInstrument,
    ) -> Result<CheckoutReceipt, CheckoutError>;

    /// Open a redirect payment for the active cart. Writes nothing
    /// locally.
    async fn begin_redirect(
        &self,
        user: UserUuid,
        urls: RedirectUrls,
    ) -> Result<RedirectCheckout, CheckoutError>;

    /// Capture an approved redirect payment and record the order.
    async fn capture_redirect(
        &self,
        user: UserUuid,
        provider_order_id: &str,
    ) -> Result<CheckoutReceipt, CheckoutError>;
}

fn priced_lines(cart: &ActiveCart) -> Result<Vec<PricedLine>, CheckoutError> {
    cart.lines
        .iter()
        .map(|line| {
            let quantity = u32::try_from(line.quantity)
                .ok()
                .filter(|quantity| *quantity > 0)
                .ok_or(CheckoutError::InvalidLineQuantity)?;

            Ok(PricedLine {
                unit_price: line.unit_price,
                quantity,
            })
        })
        .collect()
}

fn snapshot_lines(cart: &ActiveCart) -> Vec<NewOrderItem> {
    cart.lines
        .iter()
        .map(|line| NewOrderItem {
            product_uuid: line.product_uuid,
            quantity: line.quantity,
            unit_price: line.unit_price,
            color: line.color.clone(),
            size: line.size.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::predicate::eq;
    use testresult::TestResult;
    use vitrine::Amount;

    use crate::{
        carts::{Cart, CartItemUuid, CartLine, CartStatus, CartUuid, MockCartsService},
        orders::MockOrdersService,
        payments::{Capture, Charge, MockChargeGateway, MockRedirectGateway, ProviderOrder},
        products::ProductUuid,
    };

    use super::*;

    fn cart_with_line(user: UserUuid, unit_price: Amount, quantity: i32) -> ActiveCart {
        let now = Timestamp::now();

        ActiveCart {
            cart: Cart {
                uuid: CartUuid::generate(),
                user_uuid: user,
                status: CartStatus::Active,
                created_at: now,
                updated_at: now,
            },
            lines: vec![CartLine {
                item_uuid: CartItemUuid::generate(),
                product_uuid: ProductUuid::generate(),
                quantity,
                color: Some("black".to_string()),
                size: None,
                title: "Waxed jacket".to_string(),
                unit_price,
                image_url: None,
            }],
        }
    }

    fn recorded(user: UserUuid, order: &NewOrder) -> Order {
        Order {
            uuid: OrderUuid::generate(),
            user_uuid: user,
            amount: order.amount,
            status: order.status,
            payment_method: order.payment_method,
            charge_id: order.charge_id.clone(),
            carrier: None,
            tracking_number: None,
            created_at: Timestamp::now(),
        }
    }

    fn orchestrator(
        carts: MockCartsService,
        orders: MockOrdersService,
        charge: MockChargeGateway,
        redirect: MockRedirectGateway,
    ) -> CheckoutOrchestrator {
        CheckoutOrchestrator::new(
            Arc::new(carts),
            Arc::new(orders),
            Arc::new(charge),
            Arc::new(redirect),
        )
    }

    #[tokio::test]
    async fn checkout_without_active_cart_is_rejected() {
        let user = UserUuid::generate();

        let mut carts = MockCartsService::new();
        carts.expect_get_active_cart().returning(|_| Ok(None));

        let mut orders = MockOrdersService::new();
        orders.expect_record_order().never();

        let mut charge = MockChargeGateway::new();
        charge.expect_create_charge().never();

        let service = orchestrator(carts, orders, charge, MockRedirectGateway::new());

        let result = service
            .checkout(user, PaymentInstrument::CardToken("tok_test".to_string()))
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn checkout_with_empty_cart_is_rejected() {
        let user = UserUuid::generate();

        let mut carts = MockCartsService::new();
        carts.expect_get_active_cart().returning(move |_| {
            Ok(Some(ActiveCart {
                cart: cart_with_line(user, Amount::from_minor(100), 1).cart,
                lines: Vec::new(),
            }))
        });

        let mut charge = MockChargeGateway::new();
        charge.expect_create_charge().never();

        let service = orchestrator(
            carts,
            MockOrdersService::new(),
            charge,
            MockRedirectGateway::new(),
        );

        let result = service
            .checkout(user, PaymentInstrument::CardToken("tok_test".to_string()))
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn failed_charge_records_nothing() {
        let user = UserUuid::generate();

        let mut carts = MockCartsService::new();
        carts
            .expect_get_active_cart()
            .returning(move |_| Ok(Some(cart_with_line(user, Amount::from_minor(10_000), 1))));
        carts.expect_complete_cart().never();

        let mut orders = MockOrdersService::new();
        orders.expect_record_order().never();

        let mut charge = MockChargeGateway::new();
        charge.expect_create_charge().returning(|_| {
            Ok(Charge {
                id: "chrg_test".to_string(),
                status: ChargeStatus::Failed,
                authorize_uri: None,
                qr_image_uri: None,
                failure_message: Some("insufficient funds".to_string()),
            })
        });

        let service = orchestrator(carts, orders, charge, MockRedirectGateway::new());

        let result = service
            .checkout(user, PaymentInstrument::CardToken("tok_test".to_string()))
            .await;

        match result {
            Err(CheckoutError::ChargeFailed(message)) => {
                assert_eq!(message, "insufficient funds");
            }
            other => panic!("expected ChargeFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_card_charge_records_paid_order_and_completes_cart() -> TestResult {
        let user = UserUuid::generate();
        let cart = cart_with_line(user, Amount::from_minor(10_000), 1);
        let cart_uuid = cart.cart.uuid;

        let mut carts = MockCartsService::new();
        {
            let cart = cart.clone();
            carts
                .expect_get_active_cart()
                .returning(move |_| Ok(Some(cart.clone())));
        }
        carts
            .expect_complete_cart()
            .with(eq(cart_uuid))
            .once()
            .returning(|_| Ok(()));

        let mut orders = MockOrdersService::new();
        orders
            .expect_record_order()
            .withf(|_, order, items| {
                order.amount == Amount::from_minor(9_500)
                    && order.status == OrderStatus::Paid
                    && order.payment_method == PaymentMethod::CreditCard
                    && order.charge_id == "chrg_test"
                    && items.len() == 1
                    && items[0].unit_price == Amount::from_minor(10_000)
            })
            .once()
            .returning(|user, order, _| Ok(recorded(user, &order)));

        let mut charge = MockChargeGateway::new();
        charge
            .expect_create_charge()
            .withf(|request| {
                request.amount == Amount::from_minor(9_500)
                    && request.currency == "thb"
                    && request.instrument == ChargeInstrument::CardToken("tok_test".to_string())
            })
            .once()
            .returning(|_| {
                Ok(Charge {
                    id: "chrg_test".to_string(),
                    status: ChargeStatus::Successful,
                    authorize_uri: None,
                    qr_image_uri: None,
                    failure_message: None,
                })
            });

        let service = orchestrator(carts, orders, charge, MockRedirectGateway::new());

        let receipt = service
            .checkout(user, PaymentInstrument::CardToken("tok_test".to_string()))
            .await?;

        assert_eq!(receipt.status, OrderStatus::Paid);
        assert_eq!(receipt.amount, Amount::from_minor(9_500));
        assert_eq!(receipt.charge_id, "chrg_test");

        Ok(())
    }

    #[tokio::test]
    async fn pending_qr_charge_records_pending_order_with_scan_uri() -> TestResult {
        let user = UserUuid::generate();

        let mut carts = MockCartsService::new();
        carts
            .expect_get_active_cart()
            .returning(move |_| Ok(Some(cart_with_line(user, Amount::from_minor(10_000), 2))));
        carts.expect_complete_cart().once().returning(|_| Ok(()));

        let mut orders = MockOrdersService::new();
        orders
            .expect_record_order()
            .withf(|_, order, _| {
                order.status == OrderStatus::Pending
                    && order.payment_method == PaymentMethod::PromptPay
                    && order.amount == Amount::from_minor(17_500)
            })
            .once()
            .returning(|user, order, _| Ok(recorded(user, &order)));

        let mut charge = MockChargeGateway::new();
        charge.expect_create_charge().returning(|_| {
            Ok(Charge {
                id: "chrg_qr".to_string(),
                status: ChargeStatus::Pending,
                authorize_uri: Some("https://pay.example/authorize".to_string()),
                qr_image_uri: Some("https://pay.example/qr.png".to_string()),
                failure_message: None,
            })
        });

        let service = orchestrator(carts, orders, charge, MockRedirectGateway::new());

        let receipt = service
            .checkout(user, PaymentInstrument::PromptPaySource("src_test".to_string()))
            .await?;

        assert_eq!(receipt.status, OrderStatus::Pending);
        assert_eq!(
            receipt.qr_image_uri.as_deref(),
            Some("https://pay.example/qr.png")
        );

        Ok(())
    }

    #[tokio::test]
    async fn begin_redirect_writes_nothing_locally() -> TestResult {
        let user = UserUuid::generate();

        let mut carts = MockCartsService::new();
        carts
            .expect_get_active_cart()
            .returning(move |_| Ok(Some(cart_with_line(user, Amount::from_minor(10_000), 1))));
        carts.expect_complete_cart().never();

        let mut orders = MockOrdersService::new();
        orders.expect_record_order().never();

        let mut redirect = MockRedirectGateway::new();
        redirect
            .expect_create_order()
            .withf(|request| {
                request.total == Amount::from_minor(9_500) && request.currency_code == "USD"
            })
            .once()
            .returning(|_| {
                Ok(ProviderOrder {
                    id: "5O190127TN364715T".to_string(),
                    status: "CREATED".to_string(),
                    approval_url: Some("https://provider.example/approve".to_string()),
                })
            });

        let service = orchestrator(carts, orders, MockChargeGateway::new(), redirect);

        let pending = service
            .begin_redirect(
                user,
                RedirectUrls {
                    return_url: "https://shop.example/checkout/redirect/capture".to_string(),
                    cancel_url: "https://shop.example/checkout".to_string(),
                },
            )
            .await?;

        assert_eq!(pending.provider_order_id, "5O190127TN364715T");
        assert_eq!(
            pending.approval_url.as_deref(),
            Some("https://provider.example/approve")
        );

        Ok(())
    }

    #[tokio::test]
    async fn incomplete_capture_records_nothing() {
        let user = UserUuid::generate();

        let mut carts = MockCartsService::new();
        carts.expect_get_active_cart().never();
        carts.expect_complete_cart().never();

        let mut orders = MockOrdersService::new();
        orders.expect_record_order().never();

        let mut redirect = MockRedirectGateway::new();
        redirect.expect_capture_order().returning(|_| {
            Ok(Capture {
                id: "5O190127TN364715T".to_string(),
                status: CaptureStatus::Other("PENDING".to_string()),
            })
        });

        let service = orchestrator(carts, orders, MockChargeGateway::new(), redirect);

        let result = service.capture_redirect(user, "5O190127TN364715T").await;

        assert!(matches!(
            result,
            Err(CheckoutError::CaptureIncomplete(status)) if status == "PENDING"
        ));
    }

    #[tokio::test]
    async fn completed_capture_records_paid_order_and_completes_cart() -> TestResult {
        let user = UserUuid::generate();
        let cart = cart_with_line(user, Amount::from_minor(10_000), 1);
        let cart_uuid = cart.cart.uuid;

        let mut carts = MockCartsService::new();
        {
            let cart = cart.clone();
            carts
                .expect_get_active_cart()
                .returning(move |_| Ok(Some(cart.clone())));
        }
        carts
            .expect_complete_cart()
            .with(eq(cart_uuid))
            .once()
            .returning(|_| Ok(()));

        let mut orders = MockOrdersService::new();
        orders
            .expect_record_order()
            .withf(|_, order, _| {
                order.status == OrderStatus::Paid
                    && order.payment_method == PaymentMethod::PayPal
                    && order.amount == Amount::from_minor(9_500)
                    && order.charge_id == "5O190127TN364715T"
            })
            .once()
            .returning(|user, order, _| Ok(recorded(user, &order)));

        let mut redirect = MockRedirectGateway::new();
        redirect
            .expect_capture_order()
            .with(eq("5O190127TN364715T"))
            .once()
            .returning(|_| {
                Ok(Capture {
                    id: "5O190127TN364715T".to_string(),
                    status: CaptureStatus::Completed,
                })
            });

        let service = orchestrator(carts, orders, MockChargeGateway::new(), redirect);

        let receipt = service.capture_redirect(user, "5O190127TN364715T").await?;

        assert_eq!(receipt.status, OrderStatus::Paid);
        assert_eq!(receipt.charge_id, "5O190127TN364715T");

        Ok(())
    }

    #[tokio::test]
    async fn capture_with_no_remaining_cart_is_rejected() {
        let user = UserUuid::generate();

        let mut carts = MockCartsService::new();
        carts.expect_get_active_cart().returning(|_| Ok(None));

        let mut orders = MockOrdersService::new();
        orders.expect_record_order().never();

        let mut redirect = MockRedirectGateway::new();
        redirect.expect_capture_order().returning(|_| {
            Ok(Capture {
                id: "5O190127TN364715T".to_string(),
                status: CaptureStatus::Completed,
            })
        });

        let service = orchestrator(carts, orders, MockChargeGateway::new(), redirect);

        let result = service.capture_redirect(user, "5O190127TN364715T").await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn non_positive_line_quantity_cannot_be_priced() {
        let user = UserUuid::generate();

        let mut carts = MockCartsService::new();
        carts
            .expect_get_active_cart()
            .returning(move |_| Ok(Some(cart_with_line(user, Amount::from_minor(10_000), 0))));

        let mut charge = MockChargeGateway::new();
        charge.expect_create_charge().never();

        let service = orchestrator(
            carts,
            MockOrdersService::new(),
            charge,
            MockRedirectGateway::new(),
        );

        let result = service
            .checkout(user, PaymentInstrument::CardToken("tok_test".to_string()))
            .await;

        assert!(matches!(result, Err(CheckoutError::InvalidLineQuantity)));
    }
}
