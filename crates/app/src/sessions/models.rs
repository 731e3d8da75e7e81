//! Session Models

use jiff::Timestamp;

use crate::{accounts::UserUuid, uuids::TypedUuid};

pub type SessionUuid = TypedUuid<Session>;

/// Session Model
#[derive(Debug, Clone)]
pub struct Session {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// A freshly issued session.
///
/// Carries the plaintext token exactly once; only its hash is stored.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user_uuid: UserUuid,
    pub expires_at: Timestamp,
}

/// Credentials row used during sign-in.
#[derive(Debug, Clone)]
pub(crate) struct StoredCredentials {
    pub user_uuid: UserUuid,
    pub password_hash: String,
}
