use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod manager;

/// Trait for managing authors.
#[async_trait]
pub trait Manager {
    /// Find all authors, each annotated with the number of books they wrote.
    async fn find_all_with_book_count(&self) -> anyhow::Result<Vec<AuthorWithCount>>;
    /// Find one author by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Author>;
    /// Count all authors.
    async fn count(&self) -> anyhow::Result<i64>;
    /// Find one page of authors in primary key order.
    async fn find_page(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Author>>;
}

/// Trait for managing transactions on authors.
#[async_trait]
pub trait TxManager {
    /// Create a new author.
    async fn create(&mut self, author: &NewAuthor) -> anyhow::Result<Option<i64>>;
    /// Update the editable fields of an author. Returns the number of affected rows.
    async fn update(&mut self, id: i64, author: &NewAuthor) -> anyhow::Result<u64>;
    /// Delete an author together with their books. Returns the number of deleted authors.
    async fn delete(&mut self, id: i64) -> anyhow::Result<u64>;
    /// Insert authors with explicit ids.
    async fn insert_bulk(&mut self, authors: Vec<Author>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for an author.
pub struct Author {
    /// Primary key.
    pub id: i64,
    /// Given name.
    pub name: String,
    /// Family name. Used as the display name of the author in book listings.
    pub surname: String,
    /// Country of origin.
    pub country: String,
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone)]
/// Author row annotated with the number of books by the author.
pub struct AuthorWithCount {
    /// Primary key.
    pub id: i64,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Country of origin.
    pub country: String,
    /// Number of books written by the author.
    pub count: i64,
}

/// The editable fields of an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Country of origin.
    pub country: String,
}
