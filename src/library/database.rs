//! Book database interface using sqlx with SQLite.
//!
//! This module provides the `BookDatabase` struct that owns the lifecycle of
//! books: storing discovered books, listing them for the shelf and tracking
//! playback positions.

use std::path::Path;

use {sqlx::SqlitePool, tracing::debug};

use crate::{
    error::domain::LibraryError,
    library::{
        models::{Book, NewBook},
        schema::{SchemaManager, create_connection_pool, create_memory_pool},
    },
};

const BOOK_COLUMNS: &str = "id, name, author, root, duration_ms, position_ms";

/// Main book database interface.
#[derive(Debug, Clone)]
pub struct BookDatabase {
    pool: SqlitePool,
}

impl BookDatabase {
    /// Opens the database file at `path` and ensures the schema is set up.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if database initialization fails.
    pub async fn open(path: &Path) -> Result<Self, LibraryError> {
        debug!("Opening book database at {:?}", path);
        let pool = create_connection_pool(path).await?;
        Self::with_pool(pool).await
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if database initialization fails.
    pub async fn in_memory() -> Result<Self, LibraryError> {
        let pool = create_memory_pool().await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, LibraryError> {
        SchemaManager::new(pool.clone()).initialize_schema().await?;
        Ok(BookDatabase { pool })
    }

    /// Inserts a book, or refreshes name, author and duration of the book
    /// already stored at the same root.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidData` for an empty name or root, or a
    /// database error if the statement fails.
    pub async fn upsert_book(&self, book: &NewBook) -> Result<Book, LibraryError> {
        if book.name.trim().is_empty() || book.root.is_empty() {
            return Err(LibraryError::InvalidData {
                reason: format!("book at '{}' needs a name and a root", book.root),
            });
        }

        let stored = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (name, author, root, duration_ms)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (root) DO UPDATE SET
                name = excluded.name,
                author = excluded.author,
                duration_ms = excluded.duration_ms,
                updated_at = CURRENT_TIMESTAMP
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.name)
        .bind(&book.author)
        .bind(&book.root)
        .bind(book.duration_ms)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Gets all books ordered by name (case-insensitive), then id.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the query fails.
    pub async fn get_books(&self) -> Result<Vec<Book>, LibraryError> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY name COLLATE NOCASE, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Gets a single book.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if no book has this id.
    pub async fn get_book(&self, id: i64) -> Result<Book, LibraryError> {
        sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Stores the playback position of a book.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidData` for a negative position and
    /// `LibraryError::NotFound` if no book has this id.
    pub async fn update_position(&self, id: i64, position_ms: i64) -> Result<(), LibraryError> {
        if position_ms < 0 {
            return Err(LibraryError::InvalidData {
                reason: format!("negative position {} for book {}", position_ms, id),
            });
        }

        let result = sqlx::query(
            "UPDATE books SET position_ms = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(position_ms)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Gives a book a new display name.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidData` for a blank name and
    /// `LibraryError::NotFound` if no book has this id.
    pub async fn rename_book(&self, id: i64, name: &str) -> Result<Book, LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::InvalidData {
                reason: format!("blank name for book {}", id),
            });
        }

        sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET name = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? \
             RETURNING {BOOK_COLUMNS}"
        ))
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    /// Removes a book.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if no book has this id.
    pub async fn remove_book(&self, id: i64) -> Result<(), LibraryError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Gets the database connection pool for advanced operations.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn not_found(id: i64) -> LibraryError {
    LibraryError::NotFound {
        entity: "book".to_string(),
        id,
    }
}
