//! Account Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

pub type UserUuid = TypedUuid<Account>;

/// Account Model
///
/// The password hash never leaves this crate; it is looked up separately
/// by the sessions service when verifying credentials.
#[derive(Debug, Clone)]
pub struct Account {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// New Account Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub password: String,
}
