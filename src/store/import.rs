use super::CatalogStore;
use crate::catalog::category::{Category, ELEMENT_LIST_TABLE};
use crate::error::StoreError;
use crate::types::{CatalogOutput, ClassificationRecord, ElementListEntry};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub records_inserted: usize,
    pub records_updated: usize,
    pub records_failed: usize,
    pub entries_inserted: usize,
    pub entries_updated: usize,
    pub entries_failed: usize,
    /// Table names touched by this import, sorted.
    pub categories_used: Vec<String>,
    pub errors: Vec<String>,
    /// RFC 3339 timestamp taken when the import finished.
    pub imported_at: String,
}

impl ImportSummary {
    pub fn total_failed(&self) -> usize {
        self.records_failed + self.entries_failed
    }
}

enum Upsert {
    Inserted,
    Updated,
}

/// Upserts every record into its category table and every list entry into
/// the element list table. Individual failures are counted and logged; only a
/// failed reset aborts the import.
pub async fn import_catalog(
    store: &dyn CatalogStore,
    output: &CatalogOutput,
    reset: bool,
) -> Result<ImportSummary, StoreError> {
    if reset {
        store.clear().await?;
        tracing::info!("[Import] Cleared existing catalog data");
    }

    let mut summary = ImportSummary::default();
    let mut tables: BTreeSet<&'static str> = BTreeSet::new();

    for record in &output.records {
        let category = record.category;
        match upsert_record(store, category, record).await {
            Ok(Upsert::Inserted) => summary.records_inserted += 1,
            Ok(Upsert::Updated) => summary.records_updated += 1,
            Err(err) => {
                tracing::warn!(
                    "[Import] Failed to store {} in {}: {}",
                    record.element,
                    category.table_name(),
                    err
                );
                summary.records_failed += 1;
                summary.errors.push(format!("{}: {}", record.element, err));
                continue;
            }
        }
        tables.insert(category.table_name());
    }

    for entry in &output.element_lists {
        match upsert_entry(store, entry).await {
            Ok(Upsert::Inserted) => summary.entries_inserted += 1,
            Ok(Upsert::Updated) => summary.entries_updated += 1,
            Err(err) => {
                tracing::warn!(
                    "[Import] Failed to store list item {}: {}",
                    entry.element_index,
                    err
                );
                summary.entries_failed += 1;
                summary.errors.push(format!("{}: {}", entry.element_index, err));
                continue;
            }
        }
        tables.insert(ELEMENT_LIST_TABLE);
    }

    summary.categories_used = tables.into_iter().map(str::to_string).collect();
    summary.imported_at = chrono::Utc::now().to_rfc3339();

    tracing::info!(
        "[Import] Records: {} inserted, {} updated, {} failed; list items: {} inserted, {} updated, {} failed",
        summary.records_inserted,
        summary.records_updated,
        summary.records_failed,
        summary.entries_inserted,
        summary.entries_updated,
        summary.entries_failed
    );
    Ok(summary)
}

/// An update that touches no row (the row vanished between lookup and write)
/// falls back to an insert.
async fn upsert_record(
    store: &dyn CatalogStore,
    category: Category,
    record: &ClassificationRecord,
) -> Result<Upsert, StoreError> {
    if store.find_by_element(category, &record.element).await?.is_some() {
        let affected = store
            .update(category, &record.element, record.clone())
            .await?;
        if affected > 0 {
            return Ok(Upsert::Updated);
        }
        tracing::debug!(
            "[Import] Update of {} touched no rows, inserting",
            record.element
        );
    }
    store.insert(category, record.clone()).await?;
    Ok(Upsert::Inserted)
}

async fn upsert_entry(
    store: &dyn CatalogStore,
    entry: &ElementListEntry,
) -> Result<Upsert, StoreError> {
    if store.find_by_index(&entry.element_index).await?.is_some() {
        let affected = store
            .update_entry(&entry.element_index, entry.clone())
            .await?;
        if affected > 0 {
            return Ok(Upsert::Updated);
        }
        tracing::debug!(
            "[Import] Update of list item {} touched no rows, inserting",
            entry.element_index
        );
    }
    store.insert_entry(entry.clone()).await?;
    Ok(Upsert::Inserted)
}
