//! Signup Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::accounts::NewAccount;

use crate::{auth::errors::account_into_status_error, extensions::*, state::State};

/// Signup Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<SignupRequest> for NewAccount {
    fn from(request: SignupRequest) -> Self {
        NewAccount {
            email: request.email,
            name: request.name,
            password: request.password,
        }
    }
}

/// Account Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccountResponse {
    /// Created account UUID
    pub uuid: Uuid,
    pub email: String,
    pub name: String,
}

/// Signup Handler
#[endpoint(
    tags("auth"),
    summary = "Register a new account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AccountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let account = state
        .app
        .accounts
        .register(json.into_inner().into())
        .await
        .map_err(account_into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(AccountResponse {
        uuid: account.uuid.into_uuid(),
        email: account.email,
        name: account.name,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use vitrine_app::accounts::{AccountsServiceError, MockAccountsService};

    use crate::test_helpers::{make_account, public_service, state_with_accounts};

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        public_service(
            state_with_accounts(accounts),
            Router::with_path("auth/signup").post(handler),
        )
    }

    #[tokio::test]
    async fn test_signup_returns_201() -> TestResult {
        let account = make_account("jo@example.com", "Jo");

        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register()
            .once()
            .withf(|new| new.email == "jo@example.com" && new.name == "Jo")
            .return_once(move |_| Ok(account));

        let mut res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({
                "email": "jo@example.com",
                "name": "Jo",
                "password": "hunter2",
            }))
            .send(&make_service(accounts))
            .await;

        let body: AccountResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.email, "jo@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_409() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register()
            .once()
            .return_once(|_| Err(AccountsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({
                "email": "jo@example.com",
                "name": "Jo",
                "password": "hunter2",
            }))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_fields_return_400() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register()
            .once()
            .return_once(|_| Err(AccountsServiceError::MissingRequiredData));

        let res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "email": "", "name": "", "password": "" }))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
