//! This module contains all the sqlx structs for the database tables.

/// Size of the batch for bulk inserts.
const BATCH_SIZE: usize = 1000;

/// sqlx structs for author table.
pub mod author;
/// sqlx structs for book table.
pub mod book;
/// sqlx structs for publisher table.
pub mod publisher;
/// sqlx structs for session table.
pub mod session;
/// sqlx structs for store table.
pub mod store;
/// sqlx structs for user table.
pub mod user;
