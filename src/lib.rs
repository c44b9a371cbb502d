#![deny(missing_docs)]

//! # Bookshelf
//!
//! A personal book catalog kept in an Amazon DynamoDB table.
//!
//! ## Overview
//!
//! The catalog is a single table, `bitset-bookshelf`, keyed by a numeric `id`
//! (partition key) and a string `title` (sort key), provisioned with 5 read
//! and 5 write capacity units. This library provides:
//! - [`catalog::CatalogStore`], which checks for, creates and lists tables and
//!   reads and writes [`book::BookRecord`]s
//! - One request type per DynamoDB operation, each converting its arguments
//!   into the SDK input and sending it
//! - Typed errors decoded once from the SDK's error codes
//!
//! ## Quick Example
//!
//! ```no_run
//! use bookshelf::{book, catalog, config, table};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = config::StoreConfig::default().connect().await;
//! let store = catalog::CatalogStore::new(client);
//! let books = store.ensure_table(table::BOOKSHELF_TABLE).await?;
//! store
//!     .write_batch(
//!         &books,
//!         &[
//!             book::BookRecord::new(1, "Dune", "Frank Herbert", "Chilton Books"),
//!             book::BookRecord::new(2, "Solaris", "Stanislaw Lem", "Walker")
//!                 .with_location("shelf 3"),
//!         ],
//!     )
//!     .await?;
//! let solaris = store.get_book(&books, "Solaris", 2).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@catalog`] - The catalog data-access layer
//! - [`mod@table`] - Table operations (DescribeTable, CreateTable, ListTables)
//! - [`mod@read`] - Read operations (GetItem)
//! - [`mod@write`] - Write operations (PutItem, BatchWriteItem)

/// Book records and their composite key.
pub mod book;

/// The catalog data-access layer.
pub mod catalog;

/// Common utilities for keys.
pub mod common;

/// Client and wait configuration.
pub mod config;

/// Typed store errors.
pub mod error;

/// Interactive prompts for new entries.
pub mod prompt;

/// Read operations for retrieving data from DynamoDB tables.
pub mod read;

/// Table operations and the catalog schema.
pub mod table;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Batch writing multiple items
pub mod write;

pub use error::{Error, Result, StoreError, StoreErrorKind};
