//! Cart persistence, split between cart rows and line items.

mod carts;
mod items;

pub(crate) use carts::PgCartsRepository;
pub(crate) use items::PgCartItemsRepository;
