//! Order Models

use jiff::Timestamp;
use vitrine::Amount;

use crate::{accounts::UserUuid, products::ProductUuid, uuids::TypedUuid};

pub type OrderUuid = TypedUuid<Order>;
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Settlement state of an order.
///
/// Checkout only ever writes `Pending` or `Paid`; `Failed` and
/// `Completed` are set later by back-office tooling and must still
/// decode when listing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Charge accepted but not yet settled, e.g. a QR payment awaiting
    /// scan.
    Pending,
    /// Funds captured.
    Paid,
    /// Payment ultimately did not settle.
    Failed,
    /// Fulfilled and shipped.
    Completed,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Completed => "completed",
        }
    }
}

/// Which payment rail settled the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    PromptPay,
    PayPal,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::PromptPay => "promptpay",
            Self::PayPal => "paypal",
        }
    }
}

/// Order Model
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    /// Charged total in minor units, frozen at checkout time.
    pub amount: Amount,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Identifier issued by the payment provider.
    pub charge_id: String,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub created_at: Timestamp,
}

/// New Order Model
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub amount: Amount,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub charge_id: String,
}

/// Snapshot of one cart line at checkout time.
///
/// Prices are copied here so later catalogue edits never rewrite order
/// history.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub unit_price: Amount,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// A recorded order line, joined with the product for display.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub unit_price: Amount,
    pub color: Option<String>,
    pub size: Option<String>,
    pub title: String,
    pub image_url: Option<String>,
}

/// An order with its line snapshots, as returned by order history.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
