//! Error types for catalog operations.
//!
//! Failures reported by DynamoDB are decoded once, at the SDK boundary, into a
//! [`StoreError`] carrying a [`StoreErrorKind`] together with the store's own
//! error code and message. Callers match on the kind instead of inspecting
//! code strings.

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use std::{error, fmt, time};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad classification of a store failure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StoreErrorKind {
    /// The table (or another addressed resource) does not exist.
    NotFound,
    /// The request was throttled by provisioned throughput or request limits.
    Throttled,
    /// The store rejected the request as malformed.
    ValidationFailed,
    /// The resource is being created, updated or deleted, or already exists.
    ResourceInUse,
    /// Any other failure, including transport errors that carry no code.
    Other,
}

impl StoreErrorKind {
    /// Classify a DynamoDB error code.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("ResourceNotFoundException") => Self::NotFound,
            Some(
                "ProvisionedThroughputExceededException"
                | "ThrottlingException"
                | "RequestLimitExceeded",
            ) => Self::Throttled,
            Some("ValidationException") => Self::ValidationFailed,
            Some("ResourceInUseException") => Self::ResourceInUse,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "not found",
            Self::Throttled => "throttled",
            Self::ValidationFailed => "validation failed",
            Self::ResourceInUse => "resource in use",
            Self::Other => "store failure",
        };
        f.write_str(name)
    }
}

/// A failure reported by the managed store.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error(
    "{kind}{}: {}: {}",
    on_table(.table),
    text_or(.code, "Unknown"),
    text_or(.message, "no message")
)]
pub struct StoreError {
    kind: StoreErrorKind,
    code: Option<String>,
    message: Option<String>,
    table: Option<String>,
}

impl StoreError {
    /// Build an error from its parts.
    pub fn new(
        kind: StoreErrorKind,
        code: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            kind,
            code,
            message,
            table: None,
        }
    }

    /// Decode the code and message the store attached to an error.
    pub fn from_metadata(metadata: &impl ProvideErrorMetadata) -> Self {
        let code = metadata.code();
        Self::new(
            StoreErrorKind::from_code(code),
            code.map(str::to_string),
            metadata.message().map(str::to_string),
        )
    }

    /// Decode an SDK error.
    ///
    /// Service errors keep the store's code and message. Errors that never
    /// reached the service (timeouts, dispatch or construction failures) are
    /// classified as [`StoreErrorKind::Other`] with the full error chain as
    /// message.
    pub fn from_sdk<E, R>(err: &SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + error::Error + 'static,
        R: fmt::Debug,
    {
        let mut store_error = Self::from_metadata(err);
        if store_error.message.is_none() {
            store_error.message = Some(DisplayErrorContext(err).to_string());
        }
        store_error
    }

    /// Attach the name of the table the failed request addressed.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// The failure classification.
    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    /// The store's error code, e.g. `ResourceNotFoundException`.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The store's error message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The table the failed request addressed, if known.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }
}

fn on_table(table: &Option<String>) -> String {
    table
        .as_deref()
        .map(|table| format!(" on table {table}"))
        .unwrap_or_default()
}

fn text_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value.as_deref().unwrap_or(default)
}

/// Errors returned by catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store rejected or failed a request.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No record exists for the requested composite key.
    #[error("book {title:?} with id {id} not found in table {table}")]
    BookNotFound {
        /// The table that was searched.
        table: String,
        /// Partition key of the missing record.
        id: i64,
        /// Sort key of the missing record.
        title: String,
    },
    /// The table did not reach the `ACTIVE` state in time.
    #[error("table {table} was not active after {waited:?}")]
    TableNotActive {
        /// The table being waited on.
        table: String,
        /// How long the caller waited.
        waited: time::Duration,
    },
    /// A batch write still had unprocessed items after every retry round.
    #[error("{remaining} items were left unprocessed in table {table}")]
    UnprocessedItems {
        /// The destination table.
        table: String,
        /// How many items were never written.
        remaining: usize,
    },
    /// A record could not be converted to or from a DynamoDB item.
    #[error("item conversion failed: {0}")]
    Serialization(#[from] serde_dynamo::Error),
}

impl Error {
    /// The store failure kind, when this error came from the store.
    pub fn store_kind(&self) -> Option<StoreErrorKind> {
        match self {
            Self::Store(store_error) => Some(store_error.kind()),
            _ => None,
        }
    }
}
