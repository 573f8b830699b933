use async_trait::async_trait;
use serde::Serialize;

pub mod manager;

/// Trait for managing users.
#[async_trait]
pub trait Manager {
    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
}

/// Trait for managing transactions on users.
#[async_trait]
pub trait TxManager {
    /// Create a user, or replace the password of an existing one.
    async fn upsert(&mut self, username: &str, password_hash: &str) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
/// Model for a user allowed to edit the catalog.
pub struct User {
    /// Primary key.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Salted password digest in `salt$digest` format.
    #[serde(skip)]
    pub password_hash: String,
}
