use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod manager;

/// Trait for managing publishers.
#[async_trait]
pub trait Manager {
    /// Find all publishers with their store and the average price of their books.
    async fn find_all_with_store_and_avg_price(&self)
        -> anyhow::Result<Vec<PublisherWithStore>>;
    /// Find one publisher by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Publisher>;
    /// Find the publishers of a book.
    async fn find_by_book(&self, book_id: i64) -> anyhow::Result<Vec<Publisher>>;
}

/// Trait for managing transactions on publishers.
#[async_trait]
pub trait TxManager {
    /// Insert publishers with explicit ids.
    async fn insert_bulk(&mut self, publishers: Vec<Publisher>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a publisher.
pub struct Publisher {
    /// Primary key.
    pub id: i64,
    /// Name of the publishing house.
    pub name: String,
    /// Year the publisher was founded.
    pub year: i64,
}

#[derive(Debug, Clone, PartialEq)]
/// Publisher joined with its store and annotated with the average book price.
pub struct PublisherWithStore {
    /// Primary key.
    pub id: i64,
    /// Name of the publishing house.
    pub name: String,
    /// Name of the store selling the publisher's books, if any.
    pub store: Option<String>,
    /// Average price over the publisher's books, `None` if it has none.
    pub price_avg: Option<f64>,
}
