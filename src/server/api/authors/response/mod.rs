use serde::Serialize;

use crate::db::models::{
    author::{Author, AuthorWithCount},
    book::Book,
};
use crate::utils::pagination::Page;

use super::request::{AuthorForm, FieldErrors};

/// Context of the author listing.
#[derive(Serialize, Debug)]
pub struct Authors {
    /// Every author with their book count.
    pub authors: Vec<AuthorWithCount>,
    /// Confirmation messages queued by a previous edit.
    pub messages: Vec<&'static str>,
}

/// Context of the author detail page.
#[derive(Serialize, Debug)]
pub struct AuthorInfo {
    /// Primary key.
    pub id: i64,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Country of origin.
    pub country: String,
    /// Books written by the author.
    pub books: Vec<Book>,
}

impl AuthorInfo {
    /// Flatten an author and their books.
    #[must_use]
    pub fn new(author: Author, books: Vec<Book>) -> Self {
        Self {
            id: author.id,
            name: author.name,
            surname: author.surname,
            country: author.country,
            books,
        }
    }
}

/// Context of the author create and update forms.
#[derive(Serialize, Debug)]
pub struct AuthorFormPage {
    /// Author being edited, `None` when creating.
    pub object: Option<Author>,
    /// Current field values.
    pub form: AuthorForm,
    /// Validation errors keyed by field.
    pub errors: FieldErrors,
}

/// Context of the delete confirmation page.
#[derive(Serialize, Debug)]
pub struct AuthorConfirmDelete {
    /// Author to delete.
    pub object: Author,
}

/// Context of the paginated author listing.
#[derive(Serialize, Debug)]
pub struct AuthorPage {
    /// Authors on the current page.
    pub author_list: Vec<Author>,
    /// Position of the current page.
    pub page_obj: PageObj,
    /// Whether the listing spans more than one page.
    pub is_paginated: bool,
    /// Confirmation messages queued by a previous edit.
    pub messages: Vec<&'static str>,
}

/// Position of a page within its listing.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct PageObj {
    /// Current page number (1-indexed).
    pub number: i64,
    /// Total number of pages.
    pub num_pages: i64,
    /// Total number of rows.
    pub count: i64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
    /// Number of the next page.
    pub next_page_number: Option<i64>,
    /// Number of the previous page.
    pub previous_page_number: Option<i64>,
}

impl From<&Page> for PageObj {
    fn from(page: &Page) -> Self {
        Self {
            number: page.number,
            num_pages: page.num_pages,
            count: page.count,
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            next_page_number: page.next_page_number(),
            previous_page_number: page.previous_page_number(),
        }
    }
}

/// Context of the generic author detail page.
#[derive(Serialize, Debug)]
pub struct AuthorDetail {
    /// The author.
    pub author: Author,
}
