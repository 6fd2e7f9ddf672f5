mod common;

use cc_ingest::catalog::category::{Category, ELEMENT_LIST_TABLE};
use cc_ingest::catalog::transform;
use cc_ingest::error::StoreError;
use cc_ingest::store::{import_catalog, CatalogStore, MemoryStore};
use common::{load_fixture, FlakyStore};

#[tokio::test]
async fn imports_records_into_category_tables() {
    let output = transform(&load_fixture("cc_sample.xml")).unwrap();
    let store = MemoryStore::new();

    let summary = import_catalog(&store, &output, true).await.unwrap();
    assert_eq!(summary.records_inserted, 6);
    assert_eq!(summary.records_updated, 0);
    assert_eq!(summary.entries_inserted, 2);
    assert_eq!(summary.total_failed(), 0);
    assert!(summary.errors.is_empty());
    assert!(!summary.imported_at.is_empty());
    assert_eq!(
        summary.categories_used,
        vec!["ase_db", "ava_db", "components", ELEMENT_LIST_TABLE, "fau_db"]
    );

    assert_eq!(store.records(Category::Fau).unwrap().len(), 3);
    assert_eq!(store.records(Category::Components).unwrap().len(), 1);
    assert_eq!(store.record_count().unwrap(), 6);
    assert_eq!(store.entries().unwrap().len(), 2);
}

#[tokio::test]
async fn reimport_without_reset_updates_in_place() {
    let output = transform(&load_fixture("cc_sample.xml")).unwrap();
    let store = MemoryStore::new();
    import_catalog(&store, &output, true).await.unwrap();
    let first_id = store
        .find_by_element(Category::Fau, "fau_gen.1.1")
        .await
        .unwrap()
        .unwrap()
        .id;

    let summary = import_catalog(&store, &output, false).await.unwrap();
    assert_eq!(summary.records_inserted, 0);
    assert_eq!(summary.records_updated, 6);
    assert_eq!(summary.entries_updated, 2);
    assert_eq!(store.record_count().unwrap(), 6);

    let again = store
        .find_by_element(Category::Fau, "fau_gen.1.1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.id, first_id);
}

#[tokio::test]
async fn reset_clears_previous_rows() {
    let store = MemoryStore::new();
    let first = transform(&load_fixture("cc_sample.xml")).unwrap();
    import_catalog(&store, &first, true).await.unwrap();

    let second = transform(
        r#"<cc><f-class id="fta" name="TOE access"><f-element id="fta_ssl.1.1">The TSF shall lock the session.</f-element></f-class></cc>"#,
    )
    .unwrap();
    let summary = import_catalog(&store, &second, true).await.unwrap();
    assert_eq!(summary.records_inserted, 1);
    assert_eq!(store.record_count().unwrap(), 1);
    assert!(store.entries().unwrap().is_empty());
    assert_eq!(store.records(Category::Fta).unwrap()[0].record.element, "fta_ssl.1.1");
}

#[tokio::test]
async fn ids_are_shared_across_tables() {
    let store = MemoryStore::new();
    let output = transform(&load_fixture("cc_sample.xml")).unwrap();
    import_catalog(&store, &output, true).await.unwrap();

    let mut ids: Vec<u64> = Category::ALL
        .iter()
        .flat_map(|c| store.records(*c).unwrap())
        .map(|row| row.id)
        .chain(store.entries().unwrap().into_iter().map(|row| row.id))
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
}

#[tokio::test]
async fn store_failures_are_counted_not_fatal() {
    let output = transform(&load_fixture("cc_sample.xml")).unwrap();
    let store = FlakyStore::new("fau_gen.1.2");

    let summary = import_catalog(&store, &output, true).await.unwrap();
    assert_eq!(summary.records_inserted, 5);
    assert_eq!(summary.records_failed, 1);
    assert_eq!(summary.entries_failed, 2);
    assert_eq!(summary.entries_inserted, 0);
    assert_eq!(summary.errors.len(), 3);
    assert!(!summary.categories_used.contains(&ELEMENT_LIST_TABLE.to_string()));
    assert_eq!(store.rejected.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn update_touching_no_rows_falls_back_to_insert() {
    let output = transform(&load_fixture("cc_sample.xml")).unwrap();
    let mut store = FlakyStore::new("");
    store.stale_rows = true;

    let summary = import_catalog(&store, &output, false).await.unwrap();
    assert_eq!(summary.records_updated, 0);
    assert_eq!(summary.records_inserted, 6);
    assert_eq!(summary.entries_updated, 0);
    assert_eq!(summary.entries_inserted, 2);
    assert_eq!(summary.total_failed(), 0);
    assert_eq!(store.inner.record_count().unwrap(), 6);
    assert_eq!(store.inner.entries().unwrap().len(), 2);
}

#[tokio::test]
async fn failed_reset_aborts_import() {
    let output = transform(&load_fixture("cc_sample.xml")).unwrap();
    let mut store = FlakyStore::new("");
    store.fail_clear = true;

    let err = import_catalog(&store, &output, true).await.unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));
    assert_eq!(store.inner.record_count().unwrap(), 0);

    let summary = import_catalog(&store, &output, false).await.unwrap();
    assert_eq!(summary.records_inserted, 6);
}

#[tokio::test]
async fn memory_store_rejects_duplicate_insert() {
    let output = transform(&load_fixture("cc_sample.xml")).unwrap();
    let store = MemoryStore::new();
    let record = output.records[0].clone();

    store.insert(record.category, record.clone()).await.unwrap();
    let err = store.insert(record.category, record.clone()).await.unwrap_err();
    assert_eq!(err, StoreError::Conflict("fau_gen.1.1".to_string()));

    let affected = store
        .update(Category::Fau, "missing", record)
        .await
        .unwrap();
    assert_eq!(affected, 0);
}
