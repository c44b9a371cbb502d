//! Read operations for retrieving data from DynamoDB tables.
//!
//! This module provides operations for reading data from DynamoDB:
//! - Getting individual items by primary key

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;
