//! Utility modules shared by the server and the CLI.

pub mod cli;
pub mod config;
pub mod pagination;
pub mod password;
