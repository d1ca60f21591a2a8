//! Audiobook library management.
//!
//! This module provides the persistence layer for books: data models,
//! schema management, database operations and folder scanning.

pub mod database;
pub mod models;
pub mod scanner;
pub mod schema;

pub use {
    database::BookDatabase,
    models::{Book, NewBook},
    scanner::{BookScanner, ScanError},
    schema::{CURRENT_SCHEMA_VERSION, SchemaError, SchemaManager},
};
