//! Common utilities for DynamoDB operations.
//!
//! This module provides the types shared by read and write operations.

/// Key types for identifying items in DynamoDB tables.
pub mod key;
