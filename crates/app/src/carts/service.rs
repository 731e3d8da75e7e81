//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    accounts::UserUuid,
    carts::{
        errors::CartsServiceError,
        models::{ActiveCart, AddItem, CartItem, CartItemUuid, CartUuid},
        repositories::{PgCartItemsRepository, PgCartsRepository},
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_active_cart(
        &self,
        user: UserUuid,
    ) -> Result<Option<ActiveCart>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts_repository.find_active_cart(&mut tx, user).await? else {
            return Ok(None);
        };

        let lines = self
            .items_repository
            .list_cart_lines(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(Some(ActiveCart { cart, lines }))
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: AddItem,
    ) -> Result<CartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        // Lookup-then-create: two concurrent first adds for the same user
        // can each create an active cart. The active-cart query orders by
        // creation time so reads stay deterministic afterwards.
        let cart = match self.carts_repository.find_active_cart(&mut tx, user).await? {
            Some(cart) => cart,
            None => {
                self.carts_repository
                    .create_cart(&mut tx, CartUuid::generate(), user)
                    .await?
            }
        };

        let merged = self
            .items_repository
            .find_mergeable_item(&mut tx, cart.uuid, &item)
            .await?;

        let item = match merged {
            Some(existing) => {
                self.items_repository
                    .add_item_quantity(&mut tx, existing.uuid, item.quantity)
                    .await?
            }
            None => {
                self.items_repository
                    .create_cart_item(&mut tx, CartItemUuid::generate(), cart.uuid, &item)
                    .await?
            }
        };

        tx.commit().await?;

        Ok(item)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .items_repository
            .delete_owned_item(&mut tx, item, user)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn complete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.carts_repository.complete_cart(&mut tx, cart).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's active cart with joined lines, if one exists.
    async fn get_active_cart(
        &self,
        user: UserUuid,
    ) -> Result<Option<ActiveCart>, CartsServiceError>;

    /// Add an item to the user's active cart, creating the cart on first
    /// use and merging into an existing line with the same product,
    /// color, and size.
    async fn add_item(&self, user: UserUuid, item: AddItem)
    -> Result<CartItem, CartsServiceError>;

    /// Remove a line from the user's active cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// Mark an active cart completed. Fails with `NotFound` when the cart
    /// is missing or already completed.
    async fn complete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use vitrine::Amount;

    use crate::{carts::models::CartStatus, products::ProductUuid, test::TestContext};

    use super::*;

    fn navy_m(product: ProductUuid, quantity: i32) -> AddItem {
        AddItem {
            product_uuid: product,
            quantity,
            color: Some("navy".to_string()),
            size: Some("m".to_string()),
        }
    }

    #[tokio::test]
    async fn first_add_creates_an_active_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await;
        let product = ctx.create_product("Waxed Field Jacket", 260_000).await;

        ctx.carts.add_item(user, navy_m(product.uuid, 2)).await?;

        let active = ctx
            .carts
            .get_active_cart(user)
            .await?
            .expect("an active cart should exist after the first add");

        assert_eq!(active.cart.status, CartStatus::Active);
        assert_eq!(active.lines.len(), 1);
        assert_eq!(active.lines[0].quantity, 2);
        assert_eq!(active.lines[0].unit_price, Amount::from_minor(260_000));
        assert_eq!(active.lines[0].title, "Waxed Field Jacket");

        Ok(())
    }

    #[tokio::test]
    async fn same_variant_merges_into_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await;
        let product = ctx.create_product("Heavyweight Tee", 45_000).await;

        ctx.carts.add_item(user, navy_m(product.uuid, 2)).await?;
        ctx.carts.add_item(user, navy_m(product.uuid, 3)).await?;

        let active = ctx
            .carts
            .get_active_cart(user)
            .await?
            .expect("the cart should still be active");

        assert_eq!(active.lines.len(), 1, "same variant must merge, not duplicate");
        assert_eq!(active.lines[0].quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn different_variant_gets_its_own_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await;
        let product = ctx.create_product("Heavyweight Tee", 45_000).await;

        ctx.carts.add_item(user, navy_m(product.uuid, 1)).await?;
        ctx.carts
            .add_item(
                user,
                AddItem {
                    product_uuid: product.uuid,
                    quantity: 1,
                    color: Some("olive".to_string()),
                    size: Some("m".to_string()),
                },
            )
            .await?;

        let active = ctx
            .carts
            .get_active_cart(user)
            .await?
            .expect("the cart should still be active");

        assert_eq!(active.lines.len(), 2);
        assert!(active.lines.iter().all(|line| line.quantity == 1));

        Ok(())
    }

    #[tokio::test]
    async fn negative_delta_decrements_a_merged_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await;
        let product = ctx.create_product("Canvas High Top", 189_000).await;

        ctx.carts.add_item(user, navy_m(product.uuid, 3)).await?;
        let item = ctx.carts.add_item(user, navy_m(product.uuid, -1)).await?;

        assert_eq!(item.quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn removing_own_item_empties_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await;
        let product = ctx.create_product("Selvedge Denim", 320_000).await;

        let item = ctx.carts.add_item(user, navy_m(product.uuid, 1)).await?;

        ctx.carts.remove_item(user, item.uuid).await?;

        let active = ctx
            .carts
            .get_active_cart(user)
            .await?
            .expect("removing the last line keeps the cart itself");

        assert!(active.lines.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn removing_another_users_item_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("owner@example.com").await;
        let intruder = ctx.create_user("intruder@example.com").await;
        let product = ctx.create_product("Selvedge Denim", 320_000).await;

        let owned = ctx.carts.add_item(owner, navy_m(product.uuid, 2)).await?;
        ctx.carts.add_item(intruder, navy_m(product.uuid, 1)).await?;

        let result = ctx.carts.remove_item(intruder, owned.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        // Both carts are untouched by the failed removal.
        let owner_cart = ctx
            .carts
            .get_active_cart(owner)
            .await?
            .expect("owner keeps an active cart");
        let intruder_cart = ctx
            .carts
            .get_active_cart(intruder)
            .await?
            .expect("intruder keeps an active cart");

        assert_eq!(owner_cart.lines.len(), 1);
        assert_eq!(owner_cart.lines[0].quantity, 2);
        assert_eq!(intruder_cart.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn completed_cart_is_not_reused_on_the_next_add() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await;
        let product = ctx.create_product("Heavyweight Tee", 45_000).await;

        ctx.carts.add_item(user, navy_m(product.uuid, 4)).await?;

        let checked_out = ctx
            .carts
            .get_active_cart(user)
            .await?
            .expect("an active cart should exist before completion");

        ctx.carts.complete_cart(checked_out.cart.uuid).await?;

        assert!(
            ctx.carts.get_active_cart(user).await?.is_none(),
            "a completed cart must no longer resolve as active"
        );

        ctx.carts.add_item(user, navy_m(product.uuid, 1)).await?;

        let fresh = ctx
            .carts
            .get_active_cart(user)
            .await?
            .expect("the next add should start a fresh cart");

        assert_ne!(fresh.cart.uuid, checked_out.cart.uuid);
        assert_eq!(fresh.lines.len(), 1);
        assert_eq!(fresh.lines[0].quantity, 1, "old lines must not carry over");

        Ok(())
    }

    #[tokio::test]
    async fn completing_a_cart_twice_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper@example.com").await;
        let product = ctx.create_product("Heavyweight Tee", 45_000).await;

        ctx.carts.add_item(user, navy_m(product.uuid, 1)).await?;

        let active = ctx
            .carts
            .get_active_cart(user)
            .await?
            .expect("an active cart should exist");

        ctx.carts.complete_cart(active.cart.uuid).await?;

        let result = ctx.carts.complete_cart(active.cart.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
