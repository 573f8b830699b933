use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod manager;

/// Trait for managing stores.
#[async_trait]
pub trait Manager {
    /// Find all stores with their publisher and the publisher's book count.
    async fn find_all_with_book_count(&self) -> anyhow::Result<Vec<StoreWithPublisher>>;
    /// Find one store by id, joined with its publisher.
    async fn find_detail_by_id(&self, id: i64) -> anyhow::Result<StoreDetail>;
    /// Find the store of a publisher.
    async fn find_by_publisher(&self, publisher_id: i64) -> anyhow::Result<Option<Store>>;
}

/// Trait for managing transactions on stores.
#[async_trait]
pub trait TxManager {
    /// Insert stores with explicit ids.
    async fn insert_bulk(&mut self, stores: Vec<Store>) -> anyhow::Result<()>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a store.
pub struct Store {
    /// Primary key.
    pub id: i64,
    /// Name of the store.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Foreign key reference to the publisher. Unique, each publisher has at most one store.
    pub publisher_id: i64,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
/// Store joined with its publisher and annotated with the publisher's book count.
pub struct StoreWithPublisher {
    /// Primary key.
    pub id: i64,
    /// Name of the store.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Name of the publisher.
    pub publisher: String,
    /// Number of books of the publisher.
    pub count: i64,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
/// Store joined with its publisher.
pub struct StoreDetail {
    /// Primary key.
    pub id: i64,
    /// Name of the store.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Primary key of the publisher.
    pub publisher_id: i64,
    /// Name of the publisher.
    pub publisher: String,
}
