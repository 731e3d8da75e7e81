//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::accounts::models::{Account, UserUuid};

const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const GET_ACCOUNT_SQL: &str = include_str!("sql/get_account.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAccountsRepository;

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: UserUuid,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<Account, sqlx::Error> {
        query_as::<Postgres, Account>(CREATE_ACCOUNT_SQL)
            .bind(uuid.into_uuid())
            .bind(email)
            .bind(name)
            .bind(password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: UserUuid,
    ) -> Result<Account, sqlx::Error> {
        query_as::<Postgres, Account>(GET_ACCOUNT_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Account {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
