//! Sessions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    accounts::UserUuid,
    sessions::models::{Session, SessionUuid, StoredCredentials},
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/find_credentials_by_email.sql");
const FIND_LIVE_SESSION_SQL: &str = include_str!("sql/find_live_session.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSessionsRepository;

impl PgSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: SessionUuid,
        user: UserUuid,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        query_as::<Postgres, Session>(CREATE_SESSION_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(token_hash)
            .bind(SqlxTimestamp::from(expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<StoredCredentials>, sqlx::Error> {
        query_as::<Postgres, StoredCredentials>(FIND_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Look up an unexpired session by token hash.
    pub(crate) async fn find_live_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        query_as::<Postgres, Session>(FIND_LIVE_SESSION_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Session {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoredCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            password_hash: row.try_get("password_hash")?,
        })
    }
}
