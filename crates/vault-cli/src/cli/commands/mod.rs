//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod generate;
pub mod shell;
pub mod tokens;
