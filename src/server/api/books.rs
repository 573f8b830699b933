//! Handlers for browsing books.
use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::models::{
    book::{self, BookListItem, BookStats},
    publisher::{self, Publisher},
};
use crate::server::errors::HTTPError;

use super::render::render;
use super::state::{App as AppState, Global as _};

/// Context of the book listing.
#[derive(Serialize, Debug)]
pub struct Books {
    /// Every book with its author's surname.
    pub books: Vec<BookListItem>,
    /// Aggregates over all books.
    pub info: BookStats,
}

/// Context of the book detail page.
#[derive(Serialize, Debug)]
pub struct BookInfo {
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
    /// Publishers carrying the book.
    pub publisher: Vec<Publisher>,
    /// Name of the book's publisher.
    pub publisher_id: String,
}

/// List all books with price and page statistics.
#[tracing::instrument(skip(data))]
pub async fn books_list(data: web::Data<AppState>) -> Result<HttpResponse, HTTPError> {
    let db = data.db();
    let info = book::Manager::aggregate_stats(db).await?;
    let books = book::Manager::find_all_with_author(db).await?;
    Ok(render(&Books { books, info }))
}

/// Show one book with its author and publisher.
#[tracing::instrument(skip(data))]
pub async fn book_info(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    let id = path.into_inner();
    let db = data.db();
    let detail = book::Manager::find_detail_by_id(db, id).await?;
    let publishers = publisher::Manager::find_by_book(db, id).await?;
    Ok(render(&BookInfo {
        id: detail.id,
        title: detail.title,
        pages: detail.pages,
        price: detail.price,
        pubdate: detail.pubdate,
        author: detail.author,
        author_id: detail.author_id,
        publisher: publishers,
        publisher_id: detail.publisher,
    }))
}
