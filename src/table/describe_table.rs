use aws_sdk_dynamodb::{Client, error, operation};

/// Describe table operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use bookshelf::table;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let describe_table = table::describe_table::DescribeTable {
///     table_name: table::BOOKSHELF_TABLE.to_string(),
/// };
/// let output = describe_table.send(client).await?;
/// println!("{:?}", output.table().and_then(|table| table.table_status()));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DescribeTable {
    /// The name of the table to describe.
    pub table_name: String,
}

impl DescribeTable {
    /// Execute the describe table operation.
    #[tracing::instrument(name = "bookshelf.describe_table", skip_all, fields(table = %self.table_name), level = "debug")]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::describe_table::DescribeTableOutput,
        error::SdkError<operation::describe_table::DescribeTableError>,
    > {
        client
            .describe_table()
            .table_name(self.table_name)
            .send()
            .await
    }
}
