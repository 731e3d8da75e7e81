//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    accounts::UserUuid,
    database::Db,
    orders::{
        errors::OrdersServiceError,
        models::{NewOrder, NewOrderItem, Order, OrderUuid, OrderWithItems},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn record_order(
        &self,
        user: UserUuid,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_order(&mut tx, OrderUuid::generate(), user, &order)
            .await?;

        for item in &items {
            self.repository
                .create_order_item(&mut tx, created.uuid, item)
                .await?;
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderWithItems>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|o| o.uuid).collect();

        let items = if uuids.is_empty() {
            Vec::new()
        } else {
            self.repository.list_order_items(&mut tx, &uuids).await?
        };

        tx.commit().await?;

        let mut history: Vec<OrderWithItems> = orders
            .into_iter()
            .map(|order| OrderWithItems {
                order,
                items: Vec::new(),
            })
            .collect();

        for item in items {
            if let Some(entry) = history
                .iter_mut()
                .find(|entry| entry.order.uuid == item.order_uuid)
            {
                entry.items.push(item);
            }
        }

        Ok(history)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Persist an order and its line snapshots in one transaction.
    async fn record_order(
        &self,
        user: UserUuid,
        order: NewOrder,
        items: Vec<NewOrderItem>,
    ) -> Result<Order, OrdersServiceError>;

    /// The user's order history, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderWithItems>, OrdersServiceError>;
}
