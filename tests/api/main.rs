mod auth_test;
mod author_edit_test;
mod books_test;
mod common;
mod pagination_test;
