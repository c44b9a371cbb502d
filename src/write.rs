//! Write operations for modifying data in DynamoDB tables.
//!
//! This module provides operations for writing data to DynamoDB:
//! - Putting new items or replacing existing ones
//! - Batch writing multiple items

/// Batch write item operation for efficiently writing multiple items.
pub mod batch_write_item;

/// Put item operation for creating or replacing items.
pub mod put_item;
