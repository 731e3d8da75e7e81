//! Cart Models

use jiff::Timestamp;
use vitrine::Amount;

use crate::{accounts::UserUuid, products::ProductUuid, uuids::TypedUuid};

pub type CartUuid = TypedUuid<Cart>;
pub type CartItemUuid = TypedUuid<CartItem>;

/// Cart lifecycle state.
///
/// A cart starts `Active` and moves to `Completed` exactly once, when an
/// order is recorded against it. Completed carts never become active
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    Active,
    Completed,
}

impl CartStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Cart Model
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub status: CartStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// CartItem Model
///
/// A raw line row. Quantity is stored as written; merge decrements can
/// drive it to zero or below and no clamping is applied here.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// A cart line joined with its product for display and pricing.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item_uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub color: Option<String>,
    pub size: Option<String>,
    pub title: String,
    pub unit_price: Amount,
    pub image_url: Option<String>,
}

/// The user's current active cart with its joined lines.
#[derive(Debug, Clone)]
pub struct ActiveCart {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
}

/// Add-to-cart request.
///
/// `quantity` is a signed delta: merging into an existing line adds it to
/// the stored quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct AddItem {
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub color: Option<String>,
    pub size: Option<String>,
}
