use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    consistent_read: Option<bool>,
    keys: collections::HashMap<String, types::AttributeValue>,
    return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    table_name: String,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use bookshelf::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     keys: common::key::Keys {
///         partition_key: common::key::Key {
///             name: "id".to_string(),
///             value: 1,
///         },
///         sort_key: Some(common::key::Key {
///             name: "title".to_string(),
///             value: "Dune".to_string(),
///         }),
///     },
///     table_name: "bitset-bookshelf".to_string(),
///     ..Default::default()
/// };
/// get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem<P, S = P> {
    /// Whether to use a strongly consistent read.
    ///
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub consistent_read: Option<bool>,
    /// The primary key of the item to retrieve.
    pub keys: common::key::Keys<P, S>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl<P: Serialize, S: Serialize> TryFrom<GetItem<P, S>> for GetItemInput {
    type Error = Error;

    fn try_from(get_item: GetItem<P, S>) -> Result<Self> {
        let keys = get_item.keys.try_into()?;
        let operation = Self {
            consistent_read: get_item.consistent_read,
            keys,
            return_consumed_capacity: get_item.return_consumed_capacity,
            table_name: get_item.table_name,
        };
        Ok(operation)
    }
}

impl<P: Serialize, S: Serialize> GetItem<P, S> {
    /// Execute the get item operation.
    #[tracing::instrument(name = "bookshelf.get_item", skip_all, fields(table = %self.table_name))]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.try_into().map_err(error::BuildError::other)?;
        client
            .get_item()
            .set_consistent_read(get_item.consistent_read)
            .set_key(Some(get_item.keys))
            .set_return_consumed_capacity(get_item.return_consumed_capacity)
            .table_name(get_item.table_name)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case::partition_key_only(
        GetItem {
            keys: common::key::Keys {
                partition_key: common::key::Key {
                    name: "a".to_string(),
                    value: Value::String(
                        "b".to_string()
                    ),
                },
                sort_key: None,
            },
            table_name: "c".to_string(),
            ..Default::default()
        },
        GetItemInput {
            keys: collections::HashMap::from(
                [(
                    "a".to_string(),
                    types::AttributeValue::S(
                        "b".to_string()
                    ),
                )]
            ),
            table_name: "c".to_string(),
            ..Default::default()
        }
    )]
    #[case::full(
        GetItem {
            consistent_read: Some(true),
            keys: common::key::Keys {
                partition_key: common::key::Key {
                    name: "id".to_string(),
                    value: Value::Number(
                        1.into()
                    ),
                },
                sort_key: Some(
                    common::key::Key {
                        name: "title".to_string(),
                        value: Value::String(
                            "Dune".to_string()
                        ),
                    }
                ),
            },
            return_consumed_capacity: Some(
                types::ReturnConsumedCapacity::Total
            ),
            table_name: "d".to_string(),
        },
        GetItemInput {
            consistent_read: Some(true),
            keys: collections::HashMap::from(
                [
                    (
                        "id".to_string(),
                        types::AttributeValue::N(
                            "1".to_string()
                        ),
                    ),
                    (
                        "title".to_string(),
                        types::AttributeValue::S(
                            "Dune".to_string()
                        ),
                    ),
                ]
            ),
            return_consumed_capacity: Some(
                types::ReturnConsumedCapacity::Total
            ),
            table_name: "d".to_string(),
        }
    )]
    fn test_get_item(#[case] args: GetItem<Value>, #[case] expected: GetItemInput) {
        let actual: GetItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
