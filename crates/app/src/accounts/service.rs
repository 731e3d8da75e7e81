//! Accounts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    accounts::{
        errors::AccountsServiceError,
        models::{Account, NewAccount, UserUuid},
        password,
        repository::PgAccountsRepository,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    db: Db,
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register(&self, account: NewAccount) -> Result<Account, AccountsServiceError> {
        if account.email.trim().is_empty()
            || account.name.trim().is_empty()
            || account.password.is_empty()
        {
            return Err(AccountsServiceError::MissingRequiredData);
        }

        let password_hash = password::hash_password(&account.password)?;
        let uuid = UserUuid::generate();

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_account(&mut tx, uuid, &account.email, &account.name, &password_hash)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_account(&self, uuid: UserUuid) -> Result<Account, AccountsServiceError> {
        let mut tx = self.db.begin().await?;

        let account = self.repository.get_account(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(account)
    }
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Create a new account with a freshly hashed password.
    async fn register(&self, account: NewAccount) -> Result<Account, AccountsServiceError>;

    /// Retrieve a single account.
    async fn get_account(&self, uuid: UserUuid) -> Result<Account, AccountsServiceError>;
}
