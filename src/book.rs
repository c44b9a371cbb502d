//! Book records stored in the catalog table.

use crate::common::key;

use serde::{Deserialize, Serialize};

/// Attribute holding the partition key.
pub const ID_ATTRIBUTE: &str = "id";

/// Attribute holding the sort key.
pub const TITLE_ATTRIBUTE: &str = "title";

/// One catalog entry.
///
/// `(id, title)` is the composite primary key. `location` is optional and
/// reads back as an empty string when the stored item lacks it.
///
/// ```rust
/// use bookshelf::book::BookRecord;
///
/// let book = BookRecord::new(1, "Dune", "Frank Herbert", "Chilton Books");
/// assert_eq!(book.location, "");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct BookRecord {
    /// Partition key.
    pub id: i64,
    /// Sort key.
    pub title: String,
    /// Author of the book.
    pub author: String,
    /// Publisher of the book.
    pub publisher: String,
    /// Where the book is kept.
    #[serde(default)]
    pub location: String,
}

impl BookRecord {
    /// Create a record with an empty location.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            publisher: publisher.into(),
            location: String::new(),
        }
    }

    /// Set where the book is kept.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// The composite key of this record.
    pub fn key(&self) -> BookKey {
        BookKey {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// Composite primary key of a [`BookRecord`].
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct BookKey {
    /// Partition key.
    pub id: i64,
    /// Sort key.
    pub title: String,
}

impl BookKey {
    /// Build a key from its components.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

impl From<BookKey> for key::Keys<i64, String> {
    fn from(book_key: BookKey) -> Self {
        Self {
            partition_key: key::Key {
                name: ID_ATTRIBUTE.to_string(),
                value: book_key.id,
            },
            sort_key: Some(key::Key {
                name: TITLE_ATTRIBUTE.to_string(),
                value: book_key.title,
            }),
        }
    }
}
