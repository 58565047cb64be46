use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Stored credential record. The hash is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user ready for insertion; the password has already been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub(crate) fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            username: self.username,
            password_hash: self.password_hash,
            created_at,
        }
    }
}
