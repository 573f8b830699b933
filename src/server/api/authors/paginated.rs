//! Paginated author listing and its detail page.
use actix_web::{web, HttpResponse};

use crate::db::models::author;
use crate::server::errors::HTTPError;
use crate::utils::pagination::Page;

use super::super::messages::Messages;
use super::super::render::{render, render_with_messages};
use super::super::state::{App as AppState, Global as _};
use super::{request, response};

/// List one page of authors in primary key order.
/// An invalid or out-of-range page is a 404.
#[tracing::instrument(skip(data, query, messages))]
pub async fn author_list(
    data: web::Data<AppState>,
    query: web::Query<request::PageQuery>,
    messages: Messages,
) -> Result<HttpResponse, HTTPError> {
    let db = data.db();
    let per_page = data.config().pagination.authors_per_page;
    let count = author::Manager::count(db).await?;
    let page = Page::resolve(count, per_page, query.page.as_deref()).map_err(|err| {
        tracing::debug!("Invalid page: {err}");
        HTTPError::NotFound
    })?;
    let author_list = author::Manager::find_page(db, page.per_page, page.offset()).await?;
    let context = response::AuthorPage {
        author_list,
        page_obj: response::PageObj::from(&page),
        is_paginated: page.num_pages > 1,
        messages: messages.texts(),
    };
    Ok(render_with_messages(&context, &messages))
}

/// Show one author.
#[tracing::instrument(skip(data))]
pub async fn author_detail(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    let found = author::Manager::find_by_id(data.db(), path.into_inner()).await?;
    Ok(render(&response::AuthorDetail { author: found }))
}
