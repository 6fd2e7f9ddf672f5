use super::{CatalogStore, StoredEntry, StoredRecord};
use crate::catalog::category::Category;
use crate::error::StoreError;
use crate::types::{ClassificationRecord, ElementListEntry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    /// One id sequence shared by every table.
    last_id: u64,
    records: HashMap<Category, Vec<StoredRecord>>,
    entries: Vec<StoredEntry>,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-process store with one table per category plus the element list table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }

    pub fn records(&self, category: Category) -> Result<Vec<StoredRecord>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.records.get(&category).cloned().unwrap_or_default())
    }

    pub fn entries(&self) -> Result<Vec<StoredEntry>, StoreError> {
        Ok(self.lock()?.entries.clone())
    }

    pub fn record_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.records.values().map(Vec::len).sum())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_by_element(
        &self,
        category: Category,
        element: &str,
    ) -> Result<Option<StoredRecord>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .records
            .get(&category)
            .and_then(|rows| rows.iter().find(|row| row.record.element == element))
            .cloned())
    }

    async fn insert(
        &self,
        category: Category,
        record: ClassificationRecord,
    ) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        let exists = tables
            .records
            .get(&category)
            .is_some_and(|rows| rows.iter().any(|row| row.record.element == record.element));
        if exists {
            return Err(StoreError::Conflict(record.element));
        }
        let id = tables.next_id();
        tables
            .records
            .entry(category)
            .or_default()
            .push(StoredRecord { id, record });
        Ok(id)
    }

    async fn update(
        &self,
        category: Category,
        element: &str,
        record: ClassificationRecord,
    ) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        let Some(row) = tables
            .records
            .get_mut(&category)
            .and_then(|rows| rows.iter_mut().find(|row| row.record.element == element))
        else {
            return Ok(0);
        };
        row.record = record;
        Ok(1)
    }

    async fn find_by_index(&self, element_index: &str) -> Result<Option<StoredEntry>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .entries
            .iter()
            .find(|row| row.entry.element_index == element_index)
            .cloned())
    }

    async fn insert_entry(&self, entry: ElementListEntry) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        if tables
            .entries
            .iter()
            .any(|row| row.entry.element_index == entry.element_index)
        {
            return Err(StoreError::Conflict(entry.element_index));
        }
        let id = tables.next_id();
        tables.entries.push(StoredEntry { id, entry });
        Ok(id)
    }

    async fn update_entry(
        &self,
        element_index: &str,
        entry: ElementListEntry,
    ) -> Result<u64, StoreError> {
        let mut tables = self.lock()?;
        let Some(row) = tables
            .entries
            .iter_mut()
            .find(|row| row.entry.element_index == element_index)
        else {
            return Ok(0);
        };
        row.entry = entry;
        Ok(1)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        tables.records.clear();
        tables.entries.clear();
        Ok(())
    }
}
