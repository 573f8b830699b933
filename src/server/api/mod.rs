//! This module contains the HTTP endpoints of the catalog.
pub mod auth;
pub mod authors;
pub mod books;
pub mod index;
pub mod messages;
pub mod publishers;
pub mod render;
pub mod routes;
pub mod state;
pub mod stores;
