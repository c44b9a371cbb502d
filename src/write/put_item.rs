use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_item};
use std::collections;

/// put item operation
#[derive(Debug, PartialEq)]
struct PutItemInput {
    item: collections::HashMap<String, types::AttributeValue>,
    return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    table_name: String,
}

/// Put item operation.
///
/// Replaces any existing item with the same primary key.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use bookshelf::{book, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     item: book::BookRecord::new(1, "Dune", "Frank Herbert", "Chilton Books"),
///     return_consumed_capacity: None,
///     table_name: "bitset-bookshelf".to_string(),
/// };
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct PutItem<T> {
    /// The item to put into the table.
    pub item: T,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// The name of the table to write to.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<PutItem<T>> for PutItemInput {
    type Error = Error;

    fn try_from(put_item: PutItem<T>) -> Result<Self> {
        let item = to_item(put_item.item)?;
        let operation = Self {
            item,
            return_consumed_capacity: put_item.return_consumed_capacity,
            table_name: put_item.table_name,
        };
        Ok(operation)
    }
}

impl<T: Serialize> PutItem<T> {
    /// Execute the put item operation.
    #[tracing::instrument(name = "bookshelf.put_item", skip_all, fields(table = %self.table_name))]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::put_item::PutItemOutput,
        error::SdkError<operation::put_item::PutItemError>,
    > {
        let put_item: PutItemInput = self.try_into().map_err(error::BuildError::other)?;
        client
            .put_item()
            .set_item(Some(put_item.item))
            .set_return_consumed_capacity(put_item.return_consumed_capacity)
            .table_name(put_item.table_name)
            .send()
            .await
    }
}
