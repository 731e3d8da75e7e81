//! Shared fixtures for handler tests.
//!
//! Handlers are exercised through `TestClient` against a `Service` whose
//! state carries mocked services. Authenticated routes skip the real auth
//! middleware and inject a fixed user uuid instead; the middleware has its
//! own tests.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;
use vitrine::Amount;

use vitrine_app::{
    accounts::{Account, MockAccountsService, UserUuid},
    carts::{ActiveCart, Cart, CartItemUuid, CartLine, CartStatus, CartUuid, MockCartsService},
    checkout::MockCheckoutService,
    context::AppContext,
    orders::MockOrdersService,
    products::{MockProductsService, ProductUuid},
    sessions::MockSessionsService,
    tracking::MockTrackingService,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_BASE_URL: &str = "http://example.com";

/// Stands in for the auth middleware on authenticated routes.
#[salvo::handler]
async fn inject_user(depot: &mut Depot) {
    depot.insert_user_uuid(TEST_USER_UUID);
}

/// A context where every service panics when called. Tests override the
/// one service under test, so an unexpected call to any other service
/// fails loudly.
fn mock_app_context() -> AppContext {
    AppContext {
        accounts: Arc::new(MockAccountsService::new()),
        sessions: Arc::new(MockSessionsService::new()),
        products: Arc::new(MockProductsService::new()),
        carts: Arc::new(MockCartsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        checkout: Arc::new(MockCheckoutService::new()),
        tracking: Arc::new(MockTrackingService::new()),
    }
}

fn make_state(app: AppContext) -> Arc<State> {
    State::from_app_context(app, TEST_BASE_URL.to_string())
}

pub(crate) fn state_with_accounts(accounts: MockAccountsService) -> Arc<State> {
    let mut app = mock_app_context();

    app.accounts = Arc::new(accounts);

    make_state(app)
}

pub(crate) fn state_with_sessions(sessions: MockSessionsService) -> Arc<State> {
    let mut app = mock_app_context();

    app.sessions = Arc::new(sessions);

    make_state(app)
}

/// Mount a router behind injected state only, as the unauthenticated
/// routes are served.
pub(crate) fn public_service(state: Arc<State>, router: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(router))
}

/// Mount a router behind injected state and a fixed authenticated user.
fn authed_service(state: Arc<State>, router: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(router),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, router: Router) -> Service {
    let mut app = mock_app_context();

    app.carts = Arc::new(carts);

    authed_service(make_state(app), router)
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, router: Router) -> Service {
    let mut app = mock_app_context();

    app.checkout = Arc::new(checkout);

    authed_service(make_state(app), router)
}

pub(crate) fn orders_service(orders: MockOrdersService, router: Router) -> Service {
    let mut app = mock_app_context();

    app.orders = Arc::new(orders);

    authed_service(make_state(app), router)
}

pub(crate) fn tracking_service(tracking: MockTrackingService, router: Router) -> Service {
    let mut app = mock_app_context();

    app.tracking = Arc::new(tracking);

    authed_service(make_state(app), router)
}

pub(crate) fn make_account(email: &str, name: &str) -> Account {
    Account {
        uuid: UserUuid::generate(),
        email: email.to_string(),
        name: name.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_active_cart(user: UserUuid, unit_price: u64, quantity: i32) -> ActiveCart {
    ActiveCart {
        cart: Cart {
            uuid: CartUuid::generate(),
            user_uuid: user,
            status: CartStatus::Active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        lines: vec![CartLine {
            item_uuid: CartItemUuid::generate(),
            product_uuid: ProductUuid::generate(),
            quantity,
            color: Some("navy".to_string()),
            size: Some("m".to_string()),
            title: "Waxed Field Jacket".to_string(),
            unit_price: Amount::from_minor(unit_price),
            image_url: None,
        }],
    }
}
