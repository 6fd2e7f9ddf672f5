//! Flattens requirement elements into classification records and element
//! list entries.

use super::document::CatalogDocument;
use super::element_list::extract_entries;
use super::hierarchy::resolve;
use super::text::reconstruct;
use crate::types::{ClassificationRecord, ElementListEntry, FormattedElement};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct EmittedRecords {
    pub records: Vec<ClassificationRecord>,
    pub element_lists: Vec<ElementListEntry>,
}

/// Visits requirement elements in document order. Records without an element
/// identifier or requirement text are dropped; list entries are only produced
/// for the first element carrying a given identifier so that every
/// `element_index` stays unique.
pub fn emit_records(doc: &CatalogDocument) -> EmittedRecords {
    let mut emitted = EmittedRecords::default();
    let mut listed_elements: HashSet<String> = HashSet::new();

    for node in doc.requirement_elements() {
        let element = node.value();
        let element_id = element.id().map(str::trim).unwrap_or_default().to_string();
        let hierarchy = resolve(node);
        let category = hierarchy.category();

        let record = ClassificationRecord {
            class_name: hierarchy.class_name.clone(),
            class_id: hierarchy.class_id.clone(),
            family: hierarchy.family.clone(),
            component: hierarchy.component.clone(),
            component_name: hierarchy.component_name.clone(),
            element: element_id.clone(),
            element_item: reconstruct(node),
            category,
        };
        if record.is_valid() {
            emitted.records.push(record);
        } else {
            tracing::debug!(
                "[Catalog] Skipping {} '{}': missing identifier or text",
                element.tag,
                element_id
            );
        }

        if element_id.is_empty() {
            continue;
        }
        if !listed_elements.insert(element_id.clone()) {
            tracing::warn!(
                "[Catalog] Duplicate element id '{}', its list items are not re-emitted",
                element_id
            );
            continue;
        }
        emitted
            .element_lists
            .extend(extract_entries(node, &element_id, &hierarchy.path));
    }

    tracing::info!(
        "[Catalog] Emitted {} records and {} element list entries",
        emitted.records.len(),
        emitted.element_lists.len()
    );
    emitted
}

/// Groups list entries under their parent element, in first-seen order, and
/// pairs them with the element's requirement text.
pub fn format_element_lists(
    records: &[ClassificationRecord],
    entries: &[ElementListEntry],
) -> Vec<FormattedElement> {
    let main_text: HashMap<&str, &str> = records
        .iter()
        .rev()
        .map(|r| (r.element.as_str(), r.element_item.as_str()))
        .collect();

    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<String>> = HashMap::new();
    for entry in entries {
        let items = grouped.entry(entry.element.as_str()).or_insert_with(|| {
            order.push(entry.element.as_str());
            Vec::new()
        });
        items.push(entry.item_text.clone());
    }

    order
        .into_iter()
        .map(|element| {
            let items = grouped.remove(element).unwrap_or_default();
            let main_text = main_text.get(element).copied().unwrap_or_default();
            FormattedElement {
                element: element.to_string(),
                main_text: main_text.to_string(),
                formatted_display: format!("{element} {main_text}\n{}", items.join("\n")),
                items,
            }
        })
        .collect()
}

/// Formatted lists for every element whose identifier starts with
/// `family_prefix` (e.g. `fau_gen`).
pub fn format_family(
    records: &[ClassificationRecord],
    entries: &[ElementListEntry],
    family_prefix: &str,
) -> Vec<FormattedElement> {
    let family_entries: Vec<ElementListEntry> = entries
        .iter()
        .filter(|entry| entry.element.starts_with(family_prefix))
        .cloned()
        .collect();
    format_element_lists(records, &family_entries)
}
