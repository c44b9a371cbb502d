use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Key component.
///
/// ```rust
/// use bookshelf::common::key;
///
/// let key = key::Key {
///     name: "id".to_string(),
///     value: 1,
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Key<T> {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: T,
}

/// Primary key (partition key and optional sort key).
///
/// The partition and sort components may have different types, as in a table
/// keyed by a numeric `id` and a string `title`.
///
/// ```rust
/// use bookshelf::common::key;
///
/// let keys = key::Keys {
///     partition_key: key::Key {
///         name: "id".to_string(),
///         value: 1,
///     },
///     sort_key: Some(key::Key {
///         name: "title".to_string(),
///         value: "Dune".to_string(),
///     }),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keys<P, S = P> {
    /// The partition key (required).
    pub partition_key: Key<P>,
    /// The sort key (optional, only for tables with composite primary keys).
    pub sort_key: Option<Key<S>>,
}

impl<P: Serialize, S: Serialize> TryFrom<Keys<P, S>>
    for collections::HashMap<String, types::AttributeValue>
{
    type Error = Error;

    fn try_from(key: Keys<P, S>) -> Result<Self> {
        let partition_key_value = to_attribute_value(key.partition_key.value)?;
        let mut keys = Self::from([(key.partition_key.name, partition_key_value)]);
        if let Some(sort_key) = key.sort_key {
            let sort_key_value = to_attribute_value(sort_key.value)?;
            keys.insert(sort_key.name, sort_key_value);
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::partition_key_only(
        Keys {
            partition_key: Key {
                name: "a".to_string(),
                value: 42,
            },
            sort_key: None,
        },
        collections::HashMap::from(
            [(
                "a".to_string(),
                types::AttributeValue::N(
                    "42".to_string()
                ),
            )]
        )
    )]
    #[case::number_partition_string_sort(
        Keys {
            partition_key: Key {
                name: "id".to_string(),
                value: 7,
            },
            sort_key: Some(
                Key {
                    name: "title".to_string(),
                    value: "Dune".to_string(),
                }
            ),
        },
        collections::HashMap::from(
            [
                (
                    "id".to_string(),
                    types::AttributeValue::N(
                        "7".to_string()
                    )
                ),
                (
                    "title".to_string(),
                    types::AttributeValue::S(
                        "Dune".to_string()
                    )
                ),
            ]
        )
    )]
    #[case::negative_partition(
        Keys {
            partition_key: Key {
                name: "id".to_string(),
                value: -3,
            },
            sort_key: Some(
                Key {
                    name: "title".to_string(),
                    value: "Solaris".to_string(),
                }
            ),
        },
        collections::HashMap::from(
            [
                (
                    "id".to_string(),
                    types::AttributeValue::N(
                        "-3".to_string()
                    )
                ),
                (
                    "title".to_string(),
                    types::AttributeValue::S(
                        "Solaris".to_string()
                    )
                ),
            ]
        )
    )]
    fn test_keys_to_hash_map(
        #[case] keys: Keys<i64, String>,
        #[case] expected: collections::HashMap<String, types::AttributeValue>,
    ) {
        let actual: collections::HashMap<String, types::AttributeValue> = keys.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
