//! SQLite persistence for history and settings

pub mod operations;
pub mod schema;

pub use operations::{HistoryEntry, HistoryStore};
pub use schema::initialize_database;
