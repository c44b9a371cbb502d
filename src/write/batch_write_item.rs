use crate::error::{Error, StoreError};

use aws_sdk_dynamodb::{Client, operation, types};
use serde::{Serialize, ser};
use serde_dynamo::to_item;
use std::time;

/// Maximum number of write requests DynamoDB accepts in one BatchWriteItem call.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// How unprocessed items are resubmitted.
///
/// DynamoDB may accept a batch but hand back part of it as `UnprocessedItems`
/// when the table is throttled. Those items are resubmitted after a backoff
/// that doubles every round, up to `max_backoff`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RetryPolicy {
    /// Resubmission rounds allowed per request before giving up.
    pub max_rounds: u32,
    /// Delay before the first resubmission.
    pub initial_backoff: time::Duration,
    /// Upper bound on any single delay.
    pub max_backoff: time::Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_rounds: 8,
            initial_backoff: time::Duration::from_millis(50),
            max_backoff: time::Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Delay before resubmission round `round` (zero based).
    pub fn backoff(&self, round: u32) -> time::Duration {
        let factor = 2u32.saturating_pow(round);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// batch write item operation, split into requests DynamoDB accepts
#[derive(Clone, Debug, Default, PartialEq)]
struct BatchWriteItemInput {
    requests: Vec<Vec<types::WriteRequest>>,
    table_name: String,
}

/// Batch write item operation.
///
/// Puts every item into a single table. Items are split into requests of at
/// most [`MAX_BATCH_WRITE_ITEMS`] and unprocessed items are resubmitted
/// according to the [`RetryPolicy`]. An empty batch sends nothing.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use bookshelf::{book, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let batch_write = write::batch_write_item::BatchWriteItem {
///     items: vec![
///         book::BookRecord::new(1, "Dune", "Frank Herbert", "Chilton Books"),
///         book::BookRecord::new(2, "Solaris", "Stanislaw Lem", "Walker"),
///     ],
///     table_name: "bitset-bookshelf".to_string(),
///     ..Default::default()
/// };
/// batch_write.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchWriteItem<T> {
    /// The items to put into the table.
    pub items: Vec<T>,
    /// How unprocessed items are resubmitted.
    pub retry_policy: RetryPolicy,
    /// The name of the table to write to.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<BatchWriteItem<T>> for BatchWriteItemInput {
    type Error = serde_dynamo::Error;

    fn try_from(batch_write_item: BatchWriteItem<T>) -> serde_dynamo::Result<Self> {
        let mut write_requests = Vec::with_capacity(batch_write_item.items.len());
        for item in batch_write_item.items {
            let item = to_item(item)?;
            let put_request = types::PutRequest::builder()
                .set_item(Some(item))
                .build()
                .map_err(<serde_dynamo::Error as ser::Error>::custom)?;
            let write_request = types::WriteRequest::builder()
                .put_request(put_request)
                .build();
            write_requests.push(write_request);
        }
        let requests = write_requests
            .chunks(MAX_BATCH_WRITE_ITEMS)
            .map(<[types::WriteRequest]>::to_vec)
            .collect();
        let operation = Self {
            requests,
            table_name: batch_write_item.table_name,
        };
        Ok(operation)
    }
}

/// Write requests the store handed back for `table_name`.
fn unprocessed_requests(
    output: operation::batch_write_item::BatchWriteItemOutput,
    table_name: &str,
) -> Vec<types::WriteRequest> {
    output
        .unprocessed_items
        .and_then(|mut unprocessed_items| unprocessed_items.remove(table_name))
        .unwrap_or_default()
}

async fn write_request(
    client: &Client,
    table_name: &str,
    request: Vec<types::WriteRequest>,
    retry_policy: &RetryPolicy,
) -> Result<(), Error> {
    let mut pending = request;
    let mut round = 0;
    loop {
        let output = client
            .batch_write_item()
            .request_items(table_name, pending)
            .send()
            .await
            .map_err(|err| StoreError::from_sdk(&err).with_table(table_name))?;
        pending = unprocessed_requests(output, table_name);
        if pending.is_empty() {
            return Ok(());
        }
        if round >= retry_policy.max_rounds {
            return Err(Error::UnprocessedItems {
                table: table_name.to_string(),
                remaining: pending.len(),
            });
        }
        let backoff = retry_policy.backoff(round);
        tracing::debug!(
            table = table_name,
            unprocessed = pending.len(),
            ?backoff,
            "resubmitting unprocessed items"
        );
        tokio::time::sleep(backoff).await;
        round += 1;
    }
}

impl<T: Serialize> BatchWriteItem<T> {
    /// Execute the batch write item operation.
    ///
    /// Requests are sent one after another; the first failure aborts the call.
    #[tracing::instrument(name = "bookshelf.batch_write_item", skip_all, fields(table = %self.table_name, items = self.items.len()))]
    pub async fn send(self, client: &Client) -> Result<(), Error> {
        let retry_policy = self.retry_policy.clone();
        let batch_write_item: BatchWriteItemInput = self.try_into()?;
        for request in batch_write_item.requests {
            write_request(client, &batch_write_item.table_name, request, &retry_policy).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book;

    use rstest::rstest;
    use std::collections;

    fn put_request(id: i64) -> types::WriteRequest {
        let item = to_item(book::BookRecord::new(id, "a", "b", "c")).unwrap();
        types::WriteRequest::builder()
            .put_request(
                types::PutRequest::builder()
                    .set_item(Some(item))
                    .build()
                    .unwrap(),
            )
            .build()
    }

    fn books(count: i64) -> Vec<book::BookRecord> {
        (0..count)
            .map(|id| book::BookRecord::new(id, "a", "b", "c"))
            .collect()
    }

    #[rstest]
    #[case::empty(0, vec![])]
    #[case::single(1, vec![1])]
    #[case::exactly_full(25, vec![25])]
    #[case::split(30, vec![25, 5])]
    #[case::many(60, vec![25, 25, 10])]
    fn test_request_splitting(#[case] count: i64, #[case] expected: Vec<usize>) {
        let batch_write_item = BatchWriteItem {
            items: books(count),
            table_name: "d".to_string(),
            ..Default::default()
        };
        let actual: BatchWriteItemInput = batch_write_item.try_into().unwrap();
        let sizes: Vec<usize> = actual.requests.iter().map(Vec::len).collect();
        assert_eq!(sizes, expected);
        assert_eq!(actual.table_name, "d");
    }

    #[rstest]
    fn test_requests_keep_order() {
        let batch_write_item = BatchWriteItem {
            items: books(27),
            table_name: "d".to_string(),
            ..Default::default()
        };
        let actual: BatchWriteItemInput = batch_write_item.try_into().unwrap();
        let expected = BatchWriteItemInput {
            requests: vec![
                (0..25).map(put_request).collect(),
                (25..27).map(put_request).collect(),
            ],
            table_name: "d".to_string(),
        };
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::nothing_unprocessed(
        operation::batch_write_item::BatchWriteItemOutput::builder().build(),
        vec![]
    )]
    #[case::other_table(
        operation::batch_write_item::BatchWriteItemOutput::builder()
            .set_unprocessed_items(
                Some(
                    collections::HashMap::from(
                        [("other".to_string(), vec![put_request(1)])]
                    )
                )
            )
            .build(),
        vec![]
    )]
    #[case::unprocessed(
        operation::batch_write_item::BatchWriteItemOutput::builder()
            .set_unprocessed_items(
                Some(
                    collections::HashMap::from(
                        [("d".to_string(), vec![put_request(1), put_request(2)])]
                    )
                )
            )
            .build(),
        vec![put_request(1), put_request(2)]
    )]
    fn test_unprocessed_requests(
        #[case] output: operation::batch_write_item::BatchWriteItemOutput,
        #[case] expected: Vec<types::WriteRequest>,
    ) {
        assert_eq!(unprocessed_requests(output, "d"), expected);
    }

    #[rstest]
    #[case::first(0, time::Duration::from_millis(50))]
    #[case::second(1, time::Duration::from_millis(100))]
    #[case::fifth(4, time::Duration::from_millis(800))]
    #[case::capped(10, time::Duration::from_secs(5))]
    #[case::overflow(40, time::Duration::from_secs(5))]
    fn test_backoff(#[case] round: u32, #[case] expected: time::Duration) {
        assert_eq!(RetryPolicy::default().backoff(round), expected);
    }
}
