//! Round trips against DynamoDB Local.
//!
//! Start DynamoDB Local and run with
//! `AWS_ENDPOINT_URL=http://localhost:8000 cargo test -- --ignored`.
//! DynamoDB Local accepts any credentials, but some must be resolvable, e.g.
//! `AWS_ACCESS_KEY_ID=local AWS_SECRET_ACCESS_KEY=local`.
//! Each test works on its own table and deletes it afterwards.

use bookshelf::{Error, StoreErrorKind, book, catalog, config};
use std::{env, time};

async fn local_store() -> catalog::CatalogStore {
    let store_config = config::StoreConfig {
        region: "us-east-1".to_string(),
        endpoint_url: Some(
            env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8000".to_string()),
        ),
        ..Default::default()
    };
    let client = store_config.connect().await;
    catalog::CatalogStore::new(client).with_wait_config(config::WaitConfig {
        poll_interval: time::Duration::from_millis(200),
        timeout: time::Duration::from_secs(30),
    })
}

fn table_name(test: &str) -> String {
    let nanos = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("bookshelf-{test}-{nanos}")
}

async fn drop_table(store: &catalog::CatalogStore, name: &str) {
    store
        .client()
        .delete_table()
        .table_name(name)
        .send()
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_table_lifecycle() {
    let store = local_store().await;
    let name = table_name("lifecycle");

    assert!(!store.table_exists(&name).await.unwrap());
    let handle = store.create_table(&name).await.unwrap();
    assert_eq!(handle.name(), name);
    assert!(handle.is_active());
    assert!(store.table_exists(&name).await.unwrap());

    let tables = store.list_tables().await.unwrap();
    assert!(tables.iter().any(|table| table.name() == name));

    let err = store.create_table(&name).await.unwrap_err();
    assert_eq!(err.store_kind(), Some(StoreErrorKind::ResourceInUse));

    drop_table(&store, &name).await;
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_missing_table() {
    let store = local_store().await;
    assert!(!store.table_exists("nonexistent-table").await.unwrap());
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_add_and_get_book() {
    let store = local_store().await;
    let name = table_name("add");
    let books = store.ensure_table(&name).await.unwrap();

    let dune = book::BookRecord::new(1, "Dune", "Frank Herbert", "Chilton Books");
    store.add_book(&books, &dune).await.unwrap();
    let actual = store.get_book(&books, "Dune", 1).await.unwrap();
    assert_eq!(actual, dune);
    assert_eq!(actual.location, "");

    let reprinted = book::BookRecord::new(1, "Dune", "Frank Herbert", "Ace Books")
        .with_location("shelf 1");
    store.add_book(&books, &reprinted).await.unwrap();
    let actual = store.get_book(&books, "Dune", 1).await.unwrap();
    assert_eq!(actual, reprinted);

    let err = store.get_book(&books, "Dune", 2).await.unwrap_err();
    assert!(matches!(err, Error::BookNotFound { id: 2, .. }));

    drop_table(&store, &name).await;
}

#[tokio::test]
#[ignore = "requires DynamoDB Local"]
async fn test_write_batch() {
    let store = local_store().await;
    let name = table_name("batch");
    let books = store.ensure_table(&name).await.unwrap();

    store.write_batch(&books, &[]).await.unwrap();

    let records: Vec<book::BookRecord> = (0..60)
        .map(|id| {
            book::BookRecord::new(id, format!("Volume {id}"), "Anonymous", "Self")
                .with_location(format!("box {}", id % 4))
        })
        .collect();
    store.write_batch(&books, &records).await.unwrap();
    for record in &records {
        let actual = store
            .get_book(&books, &record.title, record.id)
            .await
            .unwrap();
        assert_eq!(&actual, record);
    }

    drop_table(&store, &name).await;
}
