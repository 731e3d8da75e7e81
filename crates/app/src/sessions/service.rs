//! Sessions service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;

use crate::{
    accounts::{UserUuid, password},
    database::Db,
    sessions::{
        errors::SessionsServiceError,
        models::{IssuedSession, SessionUuid},
        repository::PgSessionsRepository,
        token,
    },
};

/// How long an issued session stays valid.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Clone)]
pub struct PgSessionsService {
    db: Db,
    repository: PgSessionsRepository,
}

impl PgSessionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSessionsRepository::new(),
        }
    }
}

#[async_trait]
impl SessionsService for PgSessionsService {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IssuedSession, SessionsServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials_by_email(&mut tx, email)
            .await?
            .ok_or(SessionsServiceError::InvalidCredentials)?;

        if !password::verify_password(password, &credentials.password_hash)? {
            return Err(SessionsServiceError::InvalidCredentials);
        }

        let plaintext = token::generate_token();
        let expires_at = Timestamp::now() + SESSION_TTL;

        let session = self
            .repository
            .create_session(
                &mut tx,
                SessionUuid::generate(),
                credentials.user_uuid,
                &token::hash_token(&plaintext),
                expires_at,
            )
            .await?;

        tx.commit().await?;

        Ok(IssuedSession {
            token: plaintext,
            user_uuid: session.user_uuid,
            expires_at: session.expires_at,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<UserUuid, SessionsServiceError> {
        if !token::has_token_shape(token) {
            return Err(SessionsServiceError::InvalidToken);
        }

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_live_session(&mut tx, &token::hash_token(token))
            .await?
            .ok_or(SessionsServiceError::InvalidToken)?;

        tx.commit().await?;

        Ok(session.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait SessionsService: Send + Sync {
    /// Verify credentials and issue a fresh session token.
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IssuedSession, SessionsServiceError>;

    /// Resolve a presented token to the user it belongs to.
    async fn authenticate(&self, token: &str) -> Result<UserUuid, SessionsServiceError>;
}
