//! Auth middleware.
//!
//! Accepts the session token either as a `Bearer` header (API clients)
//! or as the `token` cookie set at sign-in (browser redirects back from
//! payment providers carry no headers).

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;
use vitrine_app::sessions::SessionsServiceError;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_session_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing session token"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let user_uuid = match state.app.sessions.authenticate(&token).await {
        Ok(user_uuid) => user_uuid,
        Err(SessionsServiceError::InvalidToken | SessionsServiceError::InvalidCredentials) => {
            res.render(StatusError::unauthorized().brief("Invalid or expired session token"));

            return;
        }
        Err(SessionsServiceError::Sql(source)) => {
            error!("failed to validate session token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
        Err(SessionsServiceError::PasswordHash(source)) => {
            error!("failed to process session token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_user_uuid(user_uuid);

    ctrl.call_next(req, depot, res).await;
}

fn extract_session_token(req: &Request) -> Option<String> {
    if let Some(token) = extract_bearer_token(req) {
        return Some(token.to_string());
    }

    req.cookie("token")
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
