pub mod library;
pub mod login;
pub mod shell;
pub mod tokens;
