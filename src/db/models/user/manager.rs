//! Manager for the user model.
use super::User;
use crate::db::{DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find a user by username.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let statement = "
            SELECT u.id, u.username, u.password_hash
            FROM user u
            WHERE u.username = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, User>(statement)
                    .bind(username)
                    .fetch_optional(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Upsert a user.
    ///
    /// # Errors
    /// Errors if the user cannot be written to the database.
    async fn upsert(&mut self, username: &str, password_hash: &str) -> anyhow::Result<()> {
        let statement = "
            INSERT INTO user ( username, password_hash )
            VALUES ( $1, $2 )
            ON CONFLICT ( username ) DO UPDATE SET password_hash = excluded.password_hash
        ";
        sqlx::query(statement)
            .bind(username)
            .bind(password_hash)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }
}
