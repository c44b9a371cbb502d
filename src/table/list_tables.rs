use aws_sdk_dynamodb::{Client, error, operation};

/// List tables operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use bookshelf::table;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let table_names = table::list_tables::ListTables::default()
///     .send_all(client)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ListTables {
    /// The table name to continue listing after.
    ///
    /// Typically obtained from the `last_evaluated_table_name` in the previous response.
    pub exclusive_start_table_name: Option<String>,
    /// The maximum number of table names to return per page.
    pub limit: Option<i32>,
}

impl ListTables {
    /// The request for the page following `output`, if there is one.
    fn next_page(&self, output: &operation::list_tables::ListTablesOutput) -> Option<Self> {
        output.last_evaluated_table_name().map(|name| Self {
            exclusive_start_table_name: Some(name.to_string()),
            limit: self.limit,
        })
    }

    /// Execute the list tables operation for a single page.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::list_tables::ListTablesOutput,
        error::SdkError<operation::list_tables::ListTablesError>,
    > {
        client
            .list_tables()
            .set_exclusive_start_table_name(self.exclusive_start_table_name)
            .set_limit(self.limit)
            .send()
            .await
    }

    /// Execute the list tables operation, following pagination until every
    /// table name has been collected.
    #[tracing::instrument(name = "bookshelf.list_tables", skip_all)]
    pub async fn send_all(
        self,
        client: &Client,
    ) -> Result<Vec<String>, error::SdkError<operation::list_tables::ListTablesError>> {
        let mut table_names = Vec::new();
        let mut request = Some(self);
        while let Some(page) = request {
            let output = page.clone().send(client).await?;
            request = page.next_page(&output);
            table_names.extend(output.table_names.unwrap_or_default());
        }
        Ok(table_names)
    }
}
