//! Signin Handler

use std::sync::Arc;

use salvo::{
    http::cookie::Cookie,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::errors::session_into_status_error, extensions::*, state::State};

/// Signin Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Session Response
///
/// The token is also set as an http-only `token` cookie so browser
/// redirects from payment providers stay authenticated.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub token: String,
    pub expires_at: String,
}

/// Signin Handler
#[endpoint(
    tags("auth"),
    summary = "Sign in and receive a session token",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SigninRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .sessions
        .sign_in(&request.email, &request.password)
        .await
        .map_err(session_into_status_error)?;

    let mut cookie = Cookie::new("token", session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);

    res.add_cookie(cookie);

    Ok(Json(SessionResponse {
        token: session.token,
        expires_at: session.expires_at.to_string(),
    }))
}
