#![allow(dead_code)]
use async_trait::async_trait;
use cc_ingest::catalog::category::Category;
use cc_ingest::error::StoreError;
use cc_ingest::store::{CatalogStore, MemoryStore, StoredEntry, StoredRecord};
use cc_ingest::types::{ClassificationRecord, ElementListEntry};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(filename: &str) -> String {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Wraps a `MemoryStore` and rejects writes whose key contains `reject`.
/// Can also be told to fail `clear`, or to report every key as present while
/// updates touch no rows.
#[derive(Clone)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub reject: String,
    pub fail_clear: bool,
    pub stale_rows: bool,
    pub rejected: Arc<Mutex<Vec<String>>>,
}

impl FlakyStore {
    pub fn new(reject: &str) -> Self {
        Self {
            inner: MemoryStore::new(),
            reject: reject.to_string(),
            fail_clear: false,
            stale_rows: false,
            rejected: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn check(&self, key: &str) -> Result<(), StoreError> {
        if !self.reject.is_empty() && key.contains(&self.reject) {
            self.rejected.lock().unwrap().push(key.to_string());
            return Err(StoreError::Backend(format!("rejected {key}")));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for FlakyStore {
    async fn find_by_element(
        &self,
        category: Category,
        element: &str,
    ) -> Result<Option<StoredRecord>, StoreError> {
        if self.stale_rows {
            return Ok(Some(StoredRecord {
                id: 0,
                record: ClassificationRecord {
                    class_name: String::new(),
                    class_id: String::new(),
                    family: String::new(),
                    component: String::new(),
                    component_name: String::new(),
                    element: element.to_string(),
                    element_item: String::new(),
                    category,
                },
            }));
        }
        self.inner.find_by_element(category, element).await
    }

    async fn insert(
        &self,
        category: Category,
        record: ClassificationRecord,
    ) -> Result<u64, StoreError> {
        self.check(&record.element)?;
        self.inner.insert(category, record).await
    }

    async fn update(
        &self,
        category: Category,
        element: &str,
        record: ClassificationRecord,
    ) -> Result<u64, StoreError> {
        self.check(element)?;
        if self.stale_rows {
            return Ok(0);
        }
        self.inner.update(category, element, record).await
    }

    async fn find_by_index(&self, element_index: &str) -> Result<Option<StoredEntry>, StoreError> {
        if self.stale_rows {
            return Ok(Some(StoredEntry {
                id: 0,
                entry: ElementListEntry {
                    element: String::new(),
                    element_index: element_index.to_string(),
                    order: 0,
                    item_list: String::new(),
                    item_text: String::new(),
                },
            }));
        }
        self.inner.find_by_index(element_index).await
    }

    async fn insert_entry(&self, entry: ElementListEntry) -> Result<u64, StoreError> {
        self.check(&entry.element_index)?;
        self.inner.insert_entry(entry).await
    }

    async fn update_entry(
        &self,
        element_index: &str,
        entry: ElementListEntry,
    ) -> Result<u64, StoreError> {
        self.check(element_index)?;
        if self.stale_rows {
            return Ok(0);
        }
        self.inner.update_entry(element_index, entry).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if self.fail_clear {
            return Err(StoreError::Backend("clear refused".to_string()));
        }
        self.inner.clear().await
    }
}
