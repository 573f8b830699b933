//! Manager for the book model.
use super::{Book, BookDetail, BookListItem, BookStats};
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::{Any, QueryBuilder};

/// Row of the aggregate query, with zeros standing in for NULL.
#[derive(sqlx::FromRow)]
struct BookStatsRow {
    price_avg: f64,
    price_max: f64,
    price_min: f64,
    title_count: i64,
    pages_max: i64,
    pages_min: i64,
}

impl From<BookStatsRow> for BookStats {
    fn from(row: BookStatsRow) -> Self {
        let any = row.title_count > 0;
        Self {
            price_avg: any.then_some(row.price_avg),
            price_max: any.then_some(row.price_max),
            price_min: any.then_some(row.price_min),
            title_count: row.title_count,
            pages_max: any.then_some(row.pages_max),
            pages_min: any.then_some(row.pages_min),
        }
    }
}

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Aggregate statistics over all books.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn aggregate_stats(&self) -> anyhow::Result<BookStats> {
        // Aggregates over no rows are NULL, which the `Any` driver cannot decode.
        // They are coalesced here and turned back into `None` from the count.
        let statement = "
            SELECT
                COALESCE(AVG(price), 0.0) AS price_avg,
                COALESCE(MAX(price), 0.0) AS price_max,
                COALESCE(MIN(price), 0.0) AS price_min,
                COUNT(title) AS title_count,
                COALESCE(MAX(pages), 0) AS pages_max,
                COALESCE(MIN(pages), 0) AS pages_min
            FROM book
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, BookStatsRow>(statement)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(BookStats::from(row))
    }

    /// Find all books with the surname of their author.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_with_author(&self) -> anyhow::Result<Vec<BookListItem>> {
        let statement = "
            SELECT b.id, b.title, a.surname AS author
            FROM book b
            JOIN author a ON a.id = b.author_id
            ORDER BY b.id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, BookListItem>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find one book with author and publisher.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if there is no such book.
    async fn find_detail_by_id(&self, id: i64) -> anyhow::Result<BookDetail> {
        let statement = "
            SELECT
                b.id, b.title, b.pages, b.price, b.pubdate,
                a.surname AS author, a.id AS author_id,
                p.name AS publisher
            FROM book b
            JOIN author a ON a.id = b.author_id
            JOIN publisher p ON p.id = b.publisher_id
            WHERE b.id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, BookDetail>(statement)
                    .bind(id)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }

    /// Find all books by an author.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_author(&self, author_id: i64) -> anyhow::Result<Vec<Book>> {
        let statement = "
            SELECT b.id, b.title, b.price, b.pages, b.pubdate, b.author_id, b.publisher_id
            FROM book b
            WHERE b.author_id = $1
            ORDER BY b.id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Book>(statement)
                    .bind(author_id)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find all books by a publisher.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_publisher(&self, publisher_id: i64) -> anyhow::Result<Vec<Book>> {
        let statement = "
            SELECT b.id, b.title, b.price, b.pages, b.pubdate, b.author_id, b.publisher_id
            FROM book b
            WHERE b.publisher_id = $1
            ORDER BY b.id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Book>(statement)
                    .bind(publisher_id)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a bulk of books into the database.
    ///
    /// # Errors
    /// Errors if the books cannot be inserted into the database.
    async fn insert_bulk(&mut self, books: Vec<Book>) -> anyhow::Result<()> {
        for chunk in books.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::<Any>::new(
                "INSERT INTO book ( id, title, price, pages, pubdate, author_id, publisher_id ) ",
            );
            query_builder.push_values(chunk, |mut bindings, book| {
                bindings
                    .push_bind(book.id)
                    .push_bind(&book.title)
                    .push_bind(book.price)
                    .push_bind(book.pages)
                    .push_bind(&book.pubdate)
                    .push_bind(book.author_id)
                    .push_bind(book.publisher_id);
            });
            let query = query_builder.build();
            query.execute(&mut *self.tx).await?;
        }
        Ok(())
    }
}
