//! Manager for the store model.
use super::{Store, StoreDetail, StoreWithPublisher};
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::{Any, QueryBuilder};

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all stores with publisher name and the publisher's book count.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_with_book_count(&self) -> anyhow::Result<Vec<StoreWithPublisher>> {
        let statement = "
            SELECT s.id, s.name, s.address, p.name AS publisher, COUNT(b.id) AS count
            FROM store s
            JOIN publisher p ON p.id = s.publisher_id
            LEFT JOIN book b ON b.publisher_id = p.id
            GROUP BY s.id, s.name, s.address, p.name
            ORDER BY s.id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, StoreWithPublisher>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find one store with its publisher.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if there is no such store.
    async fn find_detail_by_id(&self, id: i64) -> anyhow::Result<StoreDetail> {
        let statement = "
            SELECT s.id, s.name, s.address, p.id AS publisher_id, p.name AS publisher
            FROM store s
            JOIN publisher p ON p.id = s.publisher_id
            WHERE s.id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, StoreDetail>(statement)
                    .bind(id)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }

    /// Find the store of a publisher, if it has one.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_publisher(&self, publisher_id: i64) -> anyhow::Result<Option<Store>> {
        let statement = "
            SELECT s.id, s.name, s.address, s.publisher_id
            FROM store s
            WHERE s.publisher_id = $1
            LIMIT 1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Store>(statement)
                    .bind(publisher_id)
                    .fetch_optional(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a bulk of stores into the database.
    ///
    /// # Errors
    /// Errors if the stores cannot be inserted into the database.
    async fn insert_bulk(&mut self, stores: Vec<Store>) -> anyhow::Result<()> {
        for chunk in stores.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::<Any>::new(
                "INSERT INTO store ( id, name, address, publisher_id ) ",
            );
            query_builder.push_values(chunk, |mut bindings, store| {
                bindings
                    .push_bind(store.id)
                    .push_bind(&store.name)
                    .push_bind(&store.address)
                    .push_bind(store.publisher_id);
            });
            let query = query_builder.build();
            query.execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
