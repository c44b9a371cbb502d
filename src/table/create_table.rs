use crate::table;

use aws_sdk_dynamodb::{Client, error, operation, types};

/// create table operation
#[derive(Clone, Debug, PartialEq)]
struct CreateTableInput {
    attribute_definitions: Vec<types::AttributeDefinition>,
    key_schema: Vec<types::KeySchemaElement>,
    provisioned_throughput: types::ProvisionedThroughput,
    table_name: String,
}

fn key_schema_element(
    key: &table::KeyAttribute,
    key_type: types::KeyType,
) -> Result<types::KeySchemaElement, error::BuildError> {
    types::KeySchemaElement::builder()
        .attribute_name(&key.name)
        .key_type(key_type)
        .build()
}

fn attribute_definition(
    key: &table::KeyAttribute,
) -> Result<types::AttributeDefinition, error::BuildError> {
    types::AttributeDefinition::builder()
        .attribute_name(&key.name)
        .attribute_type(key.attribute_type.clone())
        .build()
}

/// Create table operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use bookshelf::table;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let create_table = table::create_table::CreateTable {
///     schema: table::TableSchema::bookshelf(table::BOOKSHELF_TABLE),
/// };
/// create_table.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CreateTable {
    /// Key schema, attribute types and throughput of the new table.
    pub schema: table::TableSchema,
}

impl TryFrom<CreateTable> for CreateTableInput {
    type Error = error::BuildError;

    fn try_from(create_table: CreateTable) -> Result<Self, Self::Error> {
        let schema = create_table.schema;
        let mut key_schema = vec![key_schema_element(
            &schema.partition_key,
            types::KeyType::Hash,
        )?];
        let mut attribute_definitions = vec![attribute_definition(&schema.partition_key)?];
        if let Some(sort_key) = &schema.sort_key {
            key_schema.push(key_schema_element(sort_key, types::KeyType::Range)?);
            attribute_definitions.push(attribute_definition(sort_key)?);
        }
        let provisioned_throughput = types::ProvisionedThroughput::builder()
            .read_capacity_units(schema.read_capacity_units)
            .write_capacity_units(schema.write_capacity_units)
            .build()?;
        let operation = Self {
            attribute_definitions,
            key_schema,
            provisioned_throughput,
            table_name: schema.table_name,
        };
        Ok(operation)
    }
}

impl CreateTable {
    /// Execute the create table operation.
    ///
    /// Returns as soon as the store accepts the request; the table is usually
    /// still `CREATING` at that point.
    #[tracing::instrument(name = "bookshelf.create_table", skip_all, fields(table = %self.schema.table_name))]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::create_table::CreateTableOutput,
        error::SdkError<operation::create_table::CreateTableError>,
    > {
        let create_table: CreateTableInput = self.try_into()?;
        client
            .create_table()
            .set_attribute_definitions(Some(create_table.attribute_definitions))
            .set_key_schema(Some(create_table.key_schema))
            .provisioned_throughput(create_table.provisioned_throughput)
            .table_name(create_table.table_name)
            .send()
            .await
    }
}
