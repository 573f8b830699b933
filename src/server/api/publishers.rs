//! Handlers for browsing publishers.
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::models::{
    book::{self, Book},
    publisher::{self, PublisherWithStore},
    store::{self, Store},
};
use crate::server::errors::HTTPError;

use super::render::render;
use super::state::{App as AppState, Global as _};

/// Context of the publisher listing.
#[derive(Serialize, Debug)]
pub struct Publishers {
    /// Every publisher.
    pub pub_list: Vec<PublisherItem>,
}

/// Publisher row as displayed in the publisher listing.
#[derive(Serialize, Debug, PartialEq)]
pub struct PublisherItem {
    /// Primary key.
    pub pk: i64,
    /// Name of the publishing house.
    pub name: String,
    /// Name of the publisher's store.
    pub store: Option<String>,
    /// Aggregates over the publisher's books.
    pub books: PriceAverage,
}

/// Average price over a set of books.
#[derive(Serialize, Debug, PartialEq)]
pub struct PriceAverage {
    /// `None` for an empty set.
    #[serde(rename = "price__avg")]
    pub price_avg: Option<f64>,
}

impl From<PublisherWithStore> for PublisherItem {
    fn from(row: PublisherWithStore) -> Self {
        Self {
            pk: row.id,
            name: row.name,
            store: row.store,
            books: PriceAverage {
                price_avg: row.price_avg,
            },
        }
    }
}

/// Context of the publisher detail page.
#[derive(Serialize, Debug)]
pub struct PublisherInfo {
    /// Primary key.
    pub id: i64,
    /// Name of the publishing house.
    pub name: String,
    /// The publisher's store.
    pub store: Option<Store>,
    /// Year the publisher was founded.
    pub year: i64,
    /// Books of the publisher.
    pub books: Vec<Book>,
}

/// List all publishers with their store and average book price.
#[tracing::instrument(skip(data))]
pub async fn publishers_list(data: web::Data<AppState>) -> Result<HttpResponse, HTTPError> {
    let rows = publisher::Manager::find_all_with_store_and_avg_price(data.db()).await?;
    let pub_list = rows.into_iter().map(PublisherItem::from).collect();
    Ok(render(&Publishers { pub_list }))
}

/// Show one publisher with its store and books.
#[tracing::instrument(skip(data))]
pub async fn publisher_info(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    let id = path.into_inner();
    let db = data.db();
    let found = publisher::Manager::find_by_id(db, id).await?;
    let found_store = store::Manager::find_by_publisher(db, id).await?;
    let books = book::Manager::find_by_publisher(db, id).await?;
    Ok(render(&PublisherInfo {
        id: found.id,
        name: found.name,
        store: found_store,
        year: found.year,
        books,
    }))
}
