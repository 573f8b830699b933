//! Manager for the author model.
use super::{Author, AuthorWithCount, NewAuthor};
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::{Any, QueryBuilder};

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all authors with their book count.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_with_book_count(&self) -> anyhow::Result<Vec<AuthorWithCount>> {
        let statement = "
            SELECT a.id, a.name, a.surname, a.country, COUNT(b.id) AS count
            FROM author a
            LEFT JOIN book b ON b.author_id = a.id
            GROUP BY a.id, a.name, a.surname, a.country
            ORDER BY a.id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, AuthorWithCount>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find one author by id.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if there is no such author.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Author> {
        let statement = "
            SELECT a.id, a.name, a.surname, a.country
            FROM author a
            WHERE a.id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Author>(statement)
                    .bind(id)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }

    /// Count all authors.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn count(&self) -> anyhow::Result<i64> {
        let statement = "SELECT COUNT(*) FROM author";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, (i64,)>(statement)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row.0)
    }

    /// Find a slice of authors ordered by id.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_page(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Author>> {
        let statement = "
            SELECT a.id, a.name, a.surname, a.country
            FROM author a
            ORDER BY a.id
            LIMIT $1 OFFSET $2
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Author>(statement)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a new author.
    ///
    /// # Errors
    /// Errors if the author cannot be inserted into the database.
    async fn create(&mut self, author: &NewAuthor) -> anyhow::Result<Option<i64>> {
        let statement = "
            INSERT INTO author ( name, surname, country )
            VALUES ( $1, $2, $3 )
        ";
        let id = sqlx::query(statement)
            .bind(&author.name)
            .bind(&author.surname)
            .bind(&author.country)
            .execute(&mut *self.tx)
            .await?
            .last_insert_id();
        Ok(id)
    }

    /// Update name, surname and country of an author.
    ///
    /// # Errors
    /// Errors if the author cannot be updated.
    async fn update(&mut self, id: i64, author: &NewAuthor) -> anyhow::Result<u64> {
        let statement = "
            UPDATE author
            SET name = $1, surname = $2, country = $3
            WHERE id = $4
        ";
        let affected = sqlx::query(statement)
            .bind(&author.name)
            .bind(&author.surname)
            .bind(&author.country)
            .bind(id)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(affected)
    }

    /// Delete an author. Books by the author are deleted first so that no book
    /// is left pointing at a missing author.
    ///
    /// # Errors
    /// Errors if the author or their books cannot be deleted.
    async fn delete(&mut self, id: i64) -> anyhow::Result<u64> {
        let books = sqlx::query("DELETE FROM book WHERE author_id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        let affected = sqlx::query("DELETE FROM author WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        tracing::debug!(author_id = id, books, "Deleted author");
        Ok(affected)
    }

    /// Insert a bulk of authors into the database.
    ///
    /// # Errors
    /// Errors if the authors cannot be inserted into the database.
    async fn insert_bulk(&mut self, authors: Vec<Author>) -> anyhow::Result<()> {
        for chunk in authors.chunks(BATCH_SIZE) {
            let mut query_builder =
                QueryBuilder::<Any>::new("INSERT INTO author ( id, name, surname, country ) ");
            query_builder.push_values(chunk, |mut bindings, author| {
                bindings
                    .push_bind(author.id)
                    .push_bind(&author.name)
                    .push_bind(&author.surname)
                    .push_bind(&author.country);
            });
            let query = query_builder.build();
            query.execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
