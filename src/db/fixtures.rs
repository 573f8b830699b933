//! Loading the catalog from a JSON fixture file.
//!
//! Only authors can be edited over HTTP, so books, publishers and stores
//! enter the database through fixtures. A fixture carries explicit primary
//! keys and is loaded in a single transaction: either every row lands or
//! none does.
use std::{fs::read_to_string, path::Path};

use anyhow::Context as _;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::models::{
    author::{self, Author},
    book::{self, Book},
    publisher::{self, Publisher},
    store::{self, Store},
};
use crate::db::{DatabaseConnection, Tx as _};

/// Format of `Book::pubdate`.
pub const PUBDATE_FORMAT: &str = "%Y-%m-%d";

/// Catalog rows to load.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Fixture {
    /// Publishers, loaded first.
    pub publishers: Vec<Publisher>,
    /// Stores, each referencing a publisher.
    pub stores: Vec<Store>,
    /// Authors.
    pub authors: Vec<Author>,
    /// Books, each referencing an author and a publisher.
    pub books: Vec<Book>,
}

impl Fixture {
    /// Parse a fixture from a JSON string.
    ///
    /// # Errors
    /// Errors if the JSON is malformed or a book has an invalid `pubdate`.
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let fixture: Self = serde_json::from_str(json)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    /// Errors if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let json = read_to_string(path)
            .with_context(|| format!("Unable to read fixture file '{}'", path.display()))?;
        Self::parse(&json)
    }

    /// Check the references between rows and the book dates.
    fn validate(&self) -> anyhow::Result<()> {
        for bk in &self.books {
            NaiveDate::parse_from_str(&bk.pubdate, PUBDATE_FORMAT).with_context(|| {
                format!("Book {} has an invalid pubdate '{}'", bk.id, bk.pubdate)
            })?;
            if !self.authors.iter().any(|au| au.id == bk.author_id) {
                anyhow::bail!("Book {} references unknown author {}", bk.id, bk.author_id);
            }
            if !self.publishers.iter().any(|pb| pb.id == bk.publisher_id) {
                anyhow::bail!(
                    "Book {} references unknown publisher {}",
                    bk.id,
                    bk.publisher_id
                );
            }
        }
        for st in &self.stores {
            if !self.publishers.iter().any(|pb| pb.id == st.publisher_id) {
                anyhow::bail!(
                    "Store {} references unknown publisher {}",
                    st.id,
                    st.publisher_id
                );
            }
        }
        Ok(())
    }
}

/// Load a fixture into the database.
///
/// # Errors
/// Errors if any row cannot be inserted, in which case nothing is inserted.
#[tracing::instrument(skip(conn, fixture))]
pub async fn load(conn: &DatabaseConnection, fixture: Fixture) -> anyhow::Result<()> {
    let counts = (
        fixture.publishers.len(),
        fixture.stores.len(),
        fixture.authors.len(),
        fixture.books.len(),
    );
    let mut tx = conn.begin().await?;
    let result = insert_all(&mut tx, fixture).await;
    match result {
        Ok(()) => {
            tx.commit().await?;
            tracing::info!(
                publishers = counts.0,
                stores = counts.1,
                authors = counts.2,
                books = counts.3,
                "Loaded fixture"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!("Failed to load fixture, rolling back: {err:?}");
            tx.rollback().await?;
            Err(err)
        }
    }
}

/// Insert rows in dependency order.
async fn insert_all(
    tx: &mut crate::db::DatabaseTransaction,
    fixture: Fixture,
) -> anyhow::Result<()> {
    publisher::TxManager::insert_bulk(&mut *tx, fixture.publishers).await?;
    store::TxManager::insert_bulk(&mut *tx, fixture.stores).await?;
    author::TxManager::insert_bulk(&mut *tx, fixture.authors).await?;
    book::TxManager::insert_bulk(&mut *tx, fixture.books).await?;
    Ok(())
}
