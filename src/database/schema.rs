//! SQLite schema bootstrap

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite};
use tracing::debug;

// History is append-only: rows are inserted when a download finishes and
// never updated afterwards.
const MIGRATIONS: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        url TEXT NOT NULL,
        path TEXT NOT NULL,
        kind TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_history_created ON history(created_at)",
];

/// Open (creating if needed) the database and bring the schema up to date
pub async fn initialize_database(db_path: &str) -> Result<Pool<Sqlite>> {
    if !Sqlite::database_exists(db_path).await? {
        debug!("Creating database at {}", db_path);
        Sqlite::create_database(db_path).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_path)
        .await?;

    for statement in MIGRATIONS {
        sqlx::query(statement).execute(&pool).await?;
    }
    debug!("Schema ready");

    Ok(pool)
}
