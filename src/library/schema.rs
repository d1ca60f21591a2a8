//! Database schema definition and versioning for the audiobook library.
//!
//! This module defines the SQLite database schema and provides schema
//! versioning capabilities for future migrations.

use std::{fs::create_dir_all, path::Path};

use {
    sqlx::{
        SqlitePool,
        sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    },
    thiserror::Error,
    tracing::debug,
};

/// Error type for schema operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] sqlx::Error),
    /// Database directory could not be created.
    #[error("Database directory error: {0}")]
    IoError(#[from] std::io::Error),
    /// Schema migration error.
    #[error("Schema migration error: {reason}")]
    MigrationError { reason: String },
}

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Database schema definition.
pub struct SchemaManager {
    pool: SqlitePool,
}

impl SchemaManager {
    /// Creates a new schema manager for the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initializes the database schema.
    ///
    /// Creates all tables on a fresh database and verifies the version of an
    /// existing one.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if table creation fails or the stored version
    /// has no migration path.
    pub async fn initialize_schema(&self) -> Result<(), SchemaError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        match self.stored_version().await? {
            None => {
                debug!("Creating book schema version {}", CURRENT_SCHEMA_VERSION);
                self.create_tables().await?;
                sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
                    .bind(CURRENT_SCHEMA_VERSION)
                    .execute(&self.pool)
                    .await?;
            }
            Some(CURRENT_SCHEMA_VERSION) => {}
            Some(version) => {
                return Err(SchemaError::MigrationError {
                    reason: format!("Schema migration from version {} not implemented", version),
                });
            }
        }

        Ok(())
    }

    async fn create_tables(&self) -> Result<(), SchemaError> {
        sqlx::query(
            r#"
            CREATE TABLE books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                author TEXT,
                root TEXT NOT NULL UNIQUE,
                duration_ms INTEGER NOT NULL DEFAULT 0,
                position_ms INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX idx_books_name ON books (name COLLATE NOCASE)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Gets the current schema version, or 0 if not initialized.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the version table cannot be read.
    pub async fn get_current_version(&self) -> Result<i32, SchemaError> {
        Ok(self.stored_version().await?.unwrap_or(0))
    }

    async fn stored_version(&self) -> Result<Option<i32>, SchemaError> {
        let version: Option<i32> = sqlx::query_scalar("SELECT version FROM schema_version LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(version)
    }
}

/// Opens (creating if missing) the database file at `path`.
///
/// # Errors
///
/// Returns `SchemaError` if the connection pool cannot be created.
pub async fn create_connection_pool(path: &Path) -> Result<SqlitePool, SchemaError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    Ok(SqlitePool::connect_with(options).await?)
}

/// Creates a single-connection in-memory pool.
///
/// # Errors
///
/// Returns `SchemaError` if SQLite cannot be opened.
pub async fn create_memory_pool() -> Result<SqlitePool, SchemaError> {
    // Every connection to :memory: is a separate database, so keep exactly one.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}
