//! HTTP server for the bookstore catalog.

pub mod api;
pub mod app;
pub mod errors;
pub mod tracing;
