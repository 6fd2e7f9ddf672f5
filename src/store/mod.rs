//! Storage collaborator contract. The transform never talks to a store
//! directly; `import_catalog` drives one with the transform's output.

pub mod import;
pub mod memory;

use crate::catalog::category::Category;
use crate::error::StoreError;
use crate::types::{ClassificationRecord, ElementListEntry};
use async_trait::async_trait;
use serde::Serialize;

pub use import::{import_catalog, ImportSummary};
pub use memory::MemoryStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredRecord {
    pub id: u64,
    pub record: ClassificationRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredEntry {
    pub id: u64,
    pub entry: ElementListEntry,
}

/// Records are keyed by `element` within their category, list entries by
/// `element_index`. Implementations must serialize writes per key when shared
/// between concurrent imports.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_by_element(
        &self,
        category: Category,
        element: &str,
    ) -> Result<Option<StoredRecord>, StoreError>;

    /// Returns the generated id.
    async fn insert(
        &self,
        category: Category,
        record: ClassificationRecord,
    ) -> Result<u64, StoreError>;

    /// Returns the number of affected rows.
    async fn update(
        &self,
        category: Category,
        element: &str,
        record: ClassificationRecord,
    ) -> Result<u64, StoreError>;

    async fn find_by_index(&self, element_index: &str) -> Result<Option<StoredEntry>, StoreError>;

    async fn insert_entry(&self, entry: ElementListEntry) -> Result<u64, StoreError>;

    async fn update_entry(
        &self,
        element_index: &str,
        entry: ElementListEntry,
    ) -> Result<u64, StoreError>;

    /// Drops every record and entry.
    async fn clear(&self) -> Result<(), StoreError>;
}
