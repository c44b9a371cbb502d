//! Data-access layer for the book catalog.
//!
//! [`CatalogStore`] translates catalog requests one to one into DynamoDB
//! operations. Every store failure is logged with its code and message and
//! then returned to the caller unchanged.

use crate::{
    book, common, config,
    error::{Error, Result, StoreError, StoreErrorKind},
    read, table, write,
};

use aws_sdk_dynamodb::{Client, types};
use serde_dynamo::from_item;
use tokio::time;

/// Catalog access over a DynamoDB client.
///
/// Holds no table state: the [`table::TableHandle`] returned by
/// [`CatalogStore::load_table`] or [`CatalogStore::create_table`] is passed to
/// each item operation.
///
/// ```rust,no_run
/// use bookshelf::{book, catalog, config, table};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = config::StoreConfig::default().connect().await;
/// let store = catalog::CatalogStore::new(client);
/// let books = store.ensure_table(table::BOOKSHELF_TABLE).await?;
/// store
///     .add_book(&books, &book::BookRecord::new(1, "Dune", "Frank Herbert", "Chilton Books"))
///     .await?;
/// let dune = store.get_book(&books, "Dune", 1).await?;
/// assert_eq!(dune.location, "");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CatalogStore {
    client: Client,
    retry_policy: write::batch_write_item::RetryPolicy,
    wait: config::WaitConfig,
}

impl CatalogStore {
    /// Wrap a client with default wait and batch retry settings.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            retry_policy: write::batch_write_item::RetryPolicy::default(),
            wait: config::WaitConfig::default(),
        }
    }

    /// Replace the table activation wait settings.
    pub fn with_wait_config(mut self, wait: config::WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Replace the batch write retry policy.
    pub fn with_retry_policy(mut self, retry_policy: write::batch_write_item::RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// The underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Describe `name`, returning `None` when the table does not exist.
    pub async fn load_table(&self, name: &str) -> Result<Option<table::TableHandle>> {
        let describe_table = table::describe_table::DescribeTable {
            table_name: name.to_string(),
        };
        match describe_table.send(&self.client).await {
            Ok(output) => {
                let handle = match output.table() {
                    Some(description) => table::TableHandle::from_description(description, name),
                    None => table::TableHandle::new(name),
                };
                Ok(Some(handle))
            }
            Err(err) => {
                let store_error = StoreError::from_sdk(&err).with_table(name);
                if store_error.kind() == StoreErrorKind::NotFound {
                    return Ok(None);
                }
                tracing::error!(
                    table = name,
                    code = store_error.code(),
                    message = store_error.message(),
                    "couldn't check for existence of table"
                );
                Err(store_error.into())
            }
        }
    }

    /// Whether `name` exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let handle = self.load_table(name).await?;
        Ok(handle.is_some())
    }

    /// Create `name` with the catalog schema and wait until it is active.
    pub async fn create_table(&self, name: &str) -> Result<table::TableHandle> {
        let create_table = table::create_table::CreateTable {
            schema: table::TableSchema::bookshelf(name),
        };
        if let Err(err) = create_table.send(&self.client).await {
            let store_error = StoreError::from_sdk(&err).with_table(name);
            tracing::error!(
                table = name,
                code = store_error.code(),
                message = store_error.message(),
                "couldn't create table"
            );
            return Err(store_error.into());
        }
        tracing::info!(table = name, "created table, waiting for it to become active");
        self.wait_until_active(name).await
    }

    /// Return the handle for `name`, creating the table first if it is missing.
    pub async fn ensure_table(&self, name: &str) -> Result<table::TableHandle> {
        match self.load_table(name).await? {
            Some(handle) => Ok(handle),
            None => self.create_table(name).await,
        }
    }

    async fn wait_until_active(&self, name: &str) -> Result<table::TableHandle> {
        let started = time::Instant::now();
        loop {
            if let Some(handle) = self.load_table(name).await? {
                if handle.is_active() {
                    return Ok(handle);
                }
                tracing::debug!(table = name, status = ?handle.status(), "table not active yet");
            }
            let waited = started.elapsed();
            if waited >= self.wait.timeout {
                tracing::error!(table = name, ?waited, "table did not become active");
                return Err(Error::TableNotActive {
                    table: name.to_string(),
                    waited,
                });
            }
            time::sleep(self.wait.poll_interval).await;
        }
    }

    /// Every table visible to the current credentials and region.
    pub async fn list_tables(&self) -> Result<Vec<table::TableHandle>> {
        let table_names = table::list_tables::ListTables::default()
            .send_all(&self.client)
            .await
            .map_err(|err| {
                let store_error = StoreError::from_sdk(&err);
                tracing::error!(
                    code = store_error.code(),
                    message = store_error.message(),
                    "couldn't list tables"
                );
                store_error
            })?;
        let handles = table_names
            .into_iter()
            .map(table::TableHandle::new)
            .collect();
        Ok(handles)
    }

    /// Put every book into `table`, overwriting records with the same key.
    pub async fn write_batch(&self, table: &table::TableHandle, books: &[book::BookRecord]) -> Result<()> {
        let batch_write_item = write::batch_write_item::BatchWriteItem {
            items: books.to_vec(),
            retry_policy: self.retry_policy.clone(),
            table_name: table.name().to_string(),
        };
        if let Err(err) = batch_write_item.send(&self.client).await {
            match &err {
                Error::Store(store_error) => tracing::error!(
                    table = table.name(),
                    code = store_error.code(),
                    message = store_error.message(),
                    "couldn't write data into table"
                ),
                err => tracing::error!(table = table.name(), %err, "couldn't write data into table"),
            }
            return Err(err);
        }
        tracing::info!(table = table.name(), count = books.len(), "wrote books");
        Ok(())
    }

    /// Put `book` into `table`, replacing any record with the same key.
    pub async fn add_book(&self, table: &table::TableHandle, book: &book::BookRecord) -> Result<()> {
        let put_item = write::put_item::PutItem {
            item: book,
            return_consumed_capacity: Some(types::ReturnConsumedCapacity::Total),
            table_name: table.name().to_string(),
        };
        let output = put_item.send(&self.client).await.map_err(|err| {
            let store_error = StoreError::from_sdk(&err).with_table(table.name());
            tracing::error!(
                title = %book.title,
                code = store_error.code(),
                message = store_error.message(),
                "couldn't add book"
            );
            store_error
        })?;
        tracing::debug!(
            table = table.name(),
            id = book.id,
            title = %book.title,
            capacity_units = capacity_units(output.consumed_capacity()),
            "added book"
        );
        Ok(())
    }

    /// Fetch the record keyed by `(id, title)` from `table`.
    ///
    /// The read is strongly consistent, so a record added just before is
    /// always seen.
    pub async fn get_book(
        &self,
        table: &table::TableHandle,
        title: &str,
        id: i64,
    ) -> Result<book::BookRecord> {
        let keys: common::key::Keys<i64, String> = book::BookKey::new(id, title).into();
        let get_item = read::get_item::GetItem {
            consistent_read: Some(true),
            keys,
            return_consumed_capacity: Some(types::ReturnConsumedCapacity::Total),
            table_name: table.name().to_string(),
        };
        let output = get_item.send(&self.client).await.map_err(|err| {
            let store_error = StoreError::from_sdk(&err).with_table(table.name());
            tracing::error!(
                table = table.name(),
                title,
                code = store_error.code(),
                message = store_error.message(),
                "couldn't get book"
            );
            store_error
        })?;
        tracing::debug!(
            table = table.name(),
            id,
            title,
            capacity_units = capacity_units(output.consumed_capacity()),
            "read book"
        );
        let item = output.item.ok_or_else(|| Error::BookNotFound {
            table: table.name().to_string(),
            id,
            title: title.to_string(),
        })?;
        let book = from_item(item)?;
        Ok(book)
    }
}

fn capacity_units(consumed: Option<&types::ConsumedCapacity>) -> Option<f64> {
    consumed.and_then(types::ConsumedCapacity::capacity_units)
}
