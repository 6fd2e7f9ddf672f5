//! Ordered sub-items of multi-part requirement elements.

use super::document::{NodeKind, RawElement};
use super::text::reconstruct;
use crate::types::ElementListEntry;
use ego_tree::NodeRef;

pub fn element_index(element: &str, order: usize) -> String {
    format!("{element}_{order}")
}

/// Letter prefix for a 1-based order: `a`..`z`, then `aa`, `ab`, ...
pub fn order_letter(order: usize) -> String {
    let mut letters = Vec::new();
    let mut n = order;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'a' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Non-empty reconstructed text of each item in a list container, in order.
pub fn list_item_texts(list: NodeRef<'_, RawElement>) -> Vec<String> {
    list.children()
        .filter(|child| child.value().kind == NodeKind::ListItem)
        .map(reconstruct)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Entries for every list directly under `element`. Orders are dense across
/// all of the element's lists; empty items do not take a slot.
pub fn extract_entries(
    element: NodeRef<'_, RawElement>,
    element_id: &str,
    item_list: &str,
) -> Vec<ElementListEntry> {
    element
        .children()
        .filter(|child| child.value().kind == NodeKind::List)
        .flat_map(list_item_texts)
        .enumerate()
        .map(|(idx, text)| {
            let order = idx + 1;
            ElementListEntry {
                element: element_id.to_string(),
                element_index: element_index(element_id, order),
                order,
                item_list: item_list.to_string(),
                item_text: format!("{}. {text}", order_letter(order)),
            }
        })
        .collect()
}
