//! Parley storage crate - SQLite persistence for chat history.
//!
//! Provides a WAL-mode SQLite database with versioned migrations and a
//! repository that records question/answer exchanges and reads them back.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::ChatRepository;
