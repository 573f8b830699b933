//! Handlers for browsing and editing authors.
use actix_web::{web, HttpResponse};

use crate::db::models::{author, book};
use crate::server::errors::HTTPError;

use super::messages::Messages;
use super::render::{render, render_with_messages};
use super::state::{App as AppState, Global as _};

pub mod edit;
pub mod paginated;
/// Module that maps the HTTP web request body to structs.
pub mod request;
/// Module that maps the HTTP web response to structs.
pub mod response;

/// List all authors with the number of books each wrote.
#[tracing::instrument(skip(data, messages))]
pub async fn authors_list(
    data: web::Data<AppState>,
    messages: Messages,
) -> Result<HttpResponse, HTTPError> {
    let authors = author::Manager::find_all_with_book_count(data.db()).await?;
    let context = response::Authors {
        authors,
        messages: messages.texts(),
    };
    Ok(render_with_messages(&context, &messages))
}

/// Show one author and their books.
#[tracing::instrument(skip(data))]
pub async fn author_info(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    let id = path.into_inner();
    let db = data.db();
    let found = author::Manager::find_by_id(db, id).await?;
    let books = book::Manager::find_by_author(db, id).await?;
    Ok(render(&response::AuthorInfo::new(found, books)))
}
