//! Order ledger: immutable records of what was charged.

pub mod errors;
pub mod models;
mod repository;
mod service;

pub use errors::OrdersServiceError;
pub use models::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid,
    OrderWithItems, PaymentMethod,
};
pub use service::{MockOrdersService, OrdersService, PgOrdersService};
