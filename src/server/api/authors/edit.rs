//! Create, update and delete authors.
//!
//! Every handler here requires an [`AuthenticatedUser`]. A successful POST
//! queues a confirmation message and redirects to the author listing; an
//! invalid one renders the form again with its errors and changes nothing.
use actix_web::{web, HttpResponse};

use crate::db::models::author;
use crate::db::Tx as _;
use crate::server::errors::HTTPError;

use super::super::auth::AuthenticatedUser;
use super::super::messages::{Message, Messages};
use super::super::render::{redirect, render};
use super::super::state::{App as AppState, Global as _};
use super::request::{AuthorForm, FieldErrors};
use super::response::{AuthorConfirmDelete, AuthorFormPage};

/// Where to go after a successful edit.
pub const SUCCESS_URL: &str = "/authors/";

/// Redirect to the listing with `message` queued.
fn success(messages: &Messages, message: Message) -> HttpResponse {
    let mut builder = redirect(SUCCESS_URL);
    messages.push_to(&mut builder, message);
    builder.finish()
}

/// Form page for `form`, optionally editing `object`.
fn form_page(object: Option<author::Author>, form: AuthorForm, errors: FieldErrors) -> HttpResponse {
    render(&AuthorFormPage {
        object,
        form,
        errors,
    })
}

/// Show the empty author form.
pub async fn author_create_form(_user: AuthenticatedUser) -> HttpResponse {
    form_page(None, AuthorForm::default(), FieldErrors::new())
}

/// Create an author from the submitted form.
#[tracing::instrument(skip(user, data, form, messages), fields(user = %user.0.username))]
pub async fn author_create(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    form: web::Form<AuthorForm>,
    messages: Messages,
) -> Result<HttpResponse, HTTPError> {
    let form = form.into_inner();
    let new_author = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return Ok(form_page(None, form, errors)),
    };
    let mut tx = data.db().begin().await?;
    let id = author::TxManager::create(&mut tx, &new_author).await?;
    tx.commit().await?;
    tracing::info!(author_id = ?id, "Created author");
    Ok(success(&messages, Message::AuthorCreated))
}

/// Show the update form filled with the current values.
#[tracing::instrument(skip(_user, data))]
pub async fn author_update_form(
    _user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    let found = author::Manager::find_by_id(data.db(), path.into_inner()).await?;
    let form = AuthorForm::from(&found);
    Ok(form_page(Some(found), form, FieldErrors::new()))
}

/// Update an author from the submitted form.
#[tracing::instrument(skip(user, data, form, messages), fields(user = %user.0.username))]
pub async fn author_update(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<AuthorForm>,
    messages: Messages,
) -> Result<HttpResponse, HTTPError> {
    let id = path.into_inner();
    let db = data.db();
    let found = author::Manager::find_by_id(db, id).await?;
    let form = form.into_inner();
    let changes = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return Ok(form_page(Some(found), form, errors)),
    };
    let mut tx = db.begin().await?;
    let affected = author::TxManager::update(&mut tx, id, &changes).await?;
    if affected == 0 {
        // Deleted between the lookup and the update.
        tx.rollback().await?;
        return Err(HTTPError::NotFound);
    }
    tx.commit().await?;
    tracing::info!(author_id = id, "Updated author");
    Ok(success(&messages, Message::AuthorUpdated))
}

/// Ask for confirmation before deleting an author.
#[tracing::instrument(skip(_user, data))]
pub async fn author_delete_form(
    _user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, HTTPError> {
    let found = author::Manager::find_by_id(data.db(), path.into_inner()).await?;
    Ok(render(&AuthorConfirmDelete { object: found }))
}

/// Delete an author and their books.
#[tracing::instrument(skip(user, data, messages), fields(user = %user.0.username))]
pub async fn author_delete(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    messages: Messages,
) -> Result<HttpResponse, HTTPError> {
    let id = path.into_inner();
    let mut tx = data.db().begin().await?;
    let affected = author::TxManager::delete(&mut tx, id).await?;
    if affected == 0 {
        tx.rollback().await?;
        return Err(HTTPError::NotFound);
    }
    tx.commit().await?;
    tracing::info!(author_id = id, "Deleted author");
    Ok(success(&messages, Message::AuthorDeleted))
}
