use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod manager;

/// Trait for managing books.
#[async_trait]
pub trait Manager {
    /// Aggregate price and page statistics over all books.
    async fn aggregate_stats(&self) -> anyhow::Result<BookStats>;
    /// Find all books joined with their author.
    async fn find_all_with_author(&self) -> anyhow::Result<Vec<BookListItem>>;
    /// Find one book by id, joined with its author and publisher.
    async fn find_detail_by_id(&self, id: i64) -> anyhow::Result<BookDetail>;
    /// Find all books written by an author.
    async fn find_by_author(&self, author_id: i64) -> anyhow::Result<Vec<Book>>;
    /// Find all books issued by a publisher.
    async fn find_by_publisher(&self, publisher_id: i64) -> anyhow::Result<Vec<Book>>;
}

/// Trait for managing transactions on books.
#[async_trait]
pub trait TxManager {
    /// Insert books with explicit ids.
    async fn insert_bulk(&mut self, books: Vec<Book>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq)]
/// Model for a book.
pub struct Book {
    /// Primary key.
    pub id: i64,
    /// Title of the book.
    pub title: String,
    /// Price of the book.
    pub price: f64,
    /// Number of pages.
    pub pages: i64,
    /// Publication date in `%Y-%m-%d` format.
    pub pubdate: String,
    /// Foreign key reference to the author.
    pub author_id: i64,
    /// Foreign key reference to the publisher.
    pub publisher_id: i64,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
/// Book row as displayed in the book listing.
pub struct BookListItem {
    /// Primary key.
    pub id: i64,
    /// Title of the book.
    pub title: String,
    /// Surname of the author.
    pub author: String,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
/// Book joined with its author and publisher.
pub struct BookDetail {
    /// Primary key.
    pub id: i64,
    /// Title of the book.
    pub title: String,
    /// Number of pages.
    pub pages: i64,
    /// Price of the book.
    pub price: f64,
    /// Publication date in `%Y-%m-%d` format.
    pub pubdate: String,
    /// Surname of the author.
    pub author: String,
    /// Primary key of the author.
    pub author_id: i64,
    /// Name of the publisher.
    pub publisher: String,
}

/// Global aggregates over the book table.
/// All fields but the count are `None` when there are no books.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BookStats {
    /// Average price.
    #[serde(rename = "price__avg")]
    pub price_avg: Option<f64>,
    /// Highest price.
    #[serde(rename = "price__max")]
    pub price_max: Option<f64>,
    /// Lowest price.
    #[serde(rename = "price__min")]
    pub price_min: Option<f64>,
    /// Number of books.
    #[serde(rename = "title__count")]
    pub title_count: i64,
    /// Highest page count.
    #[serde(rename = "pages__max")]
    pub pages_max: Option<i64>,
    /// Lowest page count.
    #[serde(rename = "pages__min")]
    pub pages_min: Option<i64>,
}
