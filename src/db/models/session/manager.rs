//! Manager for the session model.
use crate::db::models::user::User;
use crate::db::{DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find the user of a live session.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_user_by_token(
        &self,
        token: &str,
        not_before: &str,
    ) -> anyhow::Result<Option<User>> {
        let statement = "
            SELECT u.id, u.username, u.password_hash
            FROM session s
            JOIN user u ON u.id = s.user_id
            WHERE s.token = $1 AND s.created_at >= $2
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, User>(statement)
                    .bind(token)
                    .bind(not_before)
                    .fetch_optional(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a new session.
    ///
    /// # Errors
    /// Errors if the session cannot be inserted into the database.
    async fn create(
        &mut self,
        token: &str,
        user_id: i64,
        created_at: &str,
    ) -> anyhow::Result<()> {
        let statement = "
            INSERT INTO session ( token, user_id, created_at )
            VALUES ( $1, $2, $3 )
        ";
        sqlx::query(statement)
            .bind(token)
            .bind(user_id)
            .bind(created_at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    /// Delete a session.
    ///
    /// # Errors
    /// Errors if the session cannot be deleted.
    async fn delete(&mut self, token: &str) -> anyhow::Result<u64> {
        let affected = sqlx::query("DELETE FROM session WHERE token = $1")
            .bind(token)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(affected)
    }

    /// Delete expired sessions.
    ///
    /// # Errors
    /// Errors if the sessions cannot be deleted.
    async fn delete_expired(&mut self, not_before: &str) -> anyhow::Result<u64> {
        let affected = sqlx::query("DELETE FROM session WHERE created_at < $1")
            .bind(not_before)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(affected)
    }
}
