//! Manager for the publisher model.
use super::{Publisher, PublisherWithStore};
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::{Any, QueryBuilder};

/// Row of the publisher listing query.
#[derive(sqlx::FromRow)]
struct PublisherRow {
    id: i64,
    name: String,
    store_name: String,
    has_store: i64,
    book_count: i64,
    price_avg: f64,
}

impl From<PublisherRow> for PublisherWithStore {
    fn from(row: PublisherRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            store: (row.has_store != 0).then_some(row.store_name),
            price_avg: (row.book_count > 0).then_some(row.price_avg),
        }
    }
}

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all publishers with store name and average book price.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_with_store_and_avg_price(
        &self,
    ) -> anyhow::Result<Vec<PublisherWithStore>> {
        // The `Any` driver cannot decode NULL expression columns, so absence is
        // selected as a flag or a count next to a non-null value.
        let statement = "
            SELECT
                p.id, p.name,
                COALESCE(s.name, '') AS store_name,
                CASE WHEN s.id IS NULL THEN 0 ELSE 1 END AS has_store,
                (SELECT COUNT(b.id) FROM book b WHERE b.publisher_id = p.id) AS book_count,
                (SELECT COALESCE(AVG(b.price), 0.0) FROM book b WHERE b.publisher_id = p.id) AS price_avg
            FROM publisher p
            LEFT JOIN store s ON s.publisher_id = p.id
            ORDER BY p.id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, PublisherRow>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows.into_iter().map(PublisherWithStore::from).collect())
    }

    /// Find one publisher by id.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if there is no such publisher.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Publisher> {
        let statement = "
            SELECT p.id, p.name, p.year
            FROM publisher p
            WHERE p.id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Publisher>(statement)
                    .bind(id)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }

    /// Find the publishers carrying a book.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_book(&self, book_id: i64) -> anyhow::Result<Vec<Publisher>> {
        let statement = "
            SELECT p.id, p.name, p.year
            FROM publisher p
            JOIN book b ON b.publisher_id = p.id
            WHERE b.id = $1
            ORDER BY p.id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Publisher>(statement)
                    .bind(book_id)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a bulk of publishers into the database.
    ///
    /// # Errors
    /// Errors if the publishers cannot be inserted into the database.
    async fn insert_bulk(&mut self, publishers: Vec<Publisher>) -> anyhow::Result<()> {
        for chunk in publishers.chunks(BATCH_SIZE) {
            let mut query_builder =
                QueryBuilder::<Any>::new("INSERT INTO publisher ( id, name, year ) ");
            query_builder.push_values(chunk, |mut bindings, publisher| {
                bindings
                    .push_bind(publisher.id)
                    .push_bind(&publisher.name)
                    .push_bind(publisher.year);
            });
            let query = query_builder.build();
            query.execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
