//! Table-level operations and the catalog table schema.
//!
//! This module provides operations for managing tables:
//! - Describing a table to learn whether it exists and is active
//! - Creating a table with a composite key and provisioned throughput
//! - Listing every table visible to the current credentials and region

/// Create table operation.
pub mod create_table;

/// Describe table operation.
pub mod describe_table;

/// List tables operation.
pub mod list_tables;

use crate::book;

use aws_sdk_dynamodb::types;

/// Name of the catalog table.
pub const BOOKSHELF_TABLE: &str = "bitset-bookshelf";

/// Read capacity units provisioned for the catalog table.
pub const READ_CAPACITY_UNITS: i64 = 5;

/// Write capacity units provisioned for the catalog table.
pub const WRITE_CAPACITY_UNITS: i64 = 5;

/// A resolved table.
///
/// Returned by the catalog's existence check, creation and listing, and passed
/// to every item operation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TableHandle {
    name: String,
    status: Option<types::TableStatus>,
}

impl TableHandle {
    /// A handle for a table whose status is unknown.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
        }
    }

    /// Build a handle from a table description, falling back to `name` when
    /// the description omits it.
    pub fn from_description(description: &types::TableDescription, name: &str) -> Self {
        Self {
            name: description.table_name().unwrap_or(name).to_string(),
            status: description.table_status().cloned(),
        }
    }

    /// The table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The status last reported by the store, if any.
    pub fn status(&self) -> Option<&types::TableStatus> {
        self.status.as_ref()
    }

    /// Whether the store reported the table as `ACTIVE`.
    pub fn is_active(&self) -> bool {
        matches!(self.status, Some(types::TableStatus::Active))
    }
}

/// A key attribute and its scalar type.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyAttribute {
    /// Attribute name.
    pub name: String,
    /// Scalar type (`S`, `N` or `B`).
    pub attribute_type: types::ScalarAttributeType,
}

impl KeyAttribute {
    /// Build a key attribute.
    pub fn new(name: impl Into<String>, attribute_type: types::ScalarAttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }
}

/// Key schema and throughput of a table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSchema {
    /// The table name.
    pub table_name: String,
    /// The partition (hash) key.
    pub partition_key: KeyAttribute,
    /// The sort (range) key, for composite primary keys.
    pub sort_key: Option<KeyAttribute>,
    /// Provisioned read capacity units.
    pub read_capacity_units: i64,
    /// Provisioned write capacity units.
    pub write_capacity_units: i64,
}

impl TableSchema {
    /// The catalog schema: partition key `id` (`N`), sort key `title` (`S`),
    /// 5 read and 5 write capacity units.
    pub fn bookshelf(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key: KeyAttribute::new(book::ID_ATTRIBUTE, types::ScalarAttributeType::N),
            sort_key: Some(KeyAttribute::new(
                book::TITLE_ATTRIBUTE,
                types::ScalarAttributeType::S,
            )),
            read_capacity_units: READ_CAPACITY_UNITS,
            write_capacity_units: WRITE_CAPACITY_UNITS,
        }
    }
}
