//! Vitrine JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vitrine_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

mod auth;
mod carts;
mod checkout;
mod config;
mod extensions;
mod healthcheck;
mod orders;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod tracking;

/// Vitrine JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let providers = config.provider_config();

    let app = match AppContext::from_database_url(&config.database_url, providers).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app, config.public_base_url)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("auth")
                .push(Router::with_path("signup").post(auth::handlers::signup::handler))
                .push(Router::with_path("signin").post(auth::handlers::signin::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("cart").get(carts::handlers::get::handler).push(
                        Router::with_path("items")
                            .post(carts::handlers::add_item::handler)
                            .push(
                                Router::with_path("{uuid}")
                                    .delete(carts::handlers::remove_item::handler),
                            ),
                    ),
                )
                .push(
                    Router::with_path("checkout")
                        .post(checkout::handlers::charge::handler)
                        .push(
                            Router::with_path("redirect")
                                .post(checkout::handlers::redirect_create::handler)
                                .push(
                                    Router::with_path("capture")
                                        .get(checkout::handlers::redirect_capture::callback_handler)
                                        .post(checkout::handlers::redirect_capture::handler),
                                ),
                        ),
                )
                .push(Router::with_path("orders").get(orders::handlers::list::handler))
                .push(Router::with_path("tracking").get(tracking::handlers::track::handler)),
        );

    let doc = OpenApi::new("Vitrine API", "0.1.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
