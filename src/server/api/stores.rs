//! Handlers for browsing stores.
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::models::{
    book::{self, Book},
    store::{self, StoreWithPublisher},
};
use crate::server::errors::HTTPError;

use super::render::render;
use super::state::{App as AppState, Global as _};

/// Context of the store listing.
#[derive(Serialize, Debug)]
pub struct Stores {
    /// Every store with its publisher and the publisher's book count.
    pub stores: Vec<StoreWithPublisher>,
}

/// Context of the store detail page.
#[derive(Serialize, Debug)]
pub struct StoreInfo {
    /// Primary key.
    pub id: i64,
    /// Name of the store.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Name of the publisher.
    pub publisher: String,
    /// Books of the store's publisher.
    pub books: Vec<Book>,
}

/// List all stores.
#[tracing::instrument(skip(data))]
pub async fn stores_list(data: web::Data<AppState>) -> Result<HttpResponse, HTTPError> {
    let stores = store::Manager::find_all_with_book_count(data.db()).await?;
    Ok(render(&Stores { stores }))
}

/// Show one store with the books of its publisher.
#[tracing::instrument(skip(data))]
pub async fn stores_info(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    let db = data.db();
    let detail = store::Manager::find_detail_by_id(db, path.into_inner()).await?;
    let books = book::Manager::find_by_publisher(db, detail.publisher_id).await?;
    Ok(render(&StoreInfo {
        id: detail.id,
        name: detail.name,
        address: detail.address,
        publisher: detail.publisher,
        books,
    }))
}
