//! Recovers class/family/component identity from an element's ancestors.

use super::category::Category;
use super::document::{NodeKind, RawElement};
use super::text::collapse_whitespace;
use super::tree::node_label;
use ego_tree::NodeRef;

pub const PATH_SEPARATOR: &str = ">";

/// Levels above an element that are inspected: component, family, class.
const ANCESTOR_LEVELS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    /// `"<id> - <name>"` of the class, e.g. `"fau - Security audit"`.
    pub class_name: String,
    pub class_id: String,
    pub family: String,
    pub component: String,
    pub component_name: String,
    /// Display-tree labels from the top-level class down to the element.
    pub path: String,
}

impl Hierarchy {
    pub fn category(&self) -> Category {
        Category::from_class_id(&self.class_id)
    }
}

/// Missing ancestors leave their fields empty.
pub fn resolve(node: NodeRef<'_, RawElement>) -> Hierarchy {
    let mut hierarchy = Hierarchy::default();
    let mut class_id = None;

    for ancestor in node.ancestors().take(ANCESTOR_LEVELS) {
        let element = ancestor.value();
        match element.kind {
            NodeKind::Component => {
                hierarchy.component = element.id().unwrap_or_default().to_string();
                hierarchy.component_name = element
                    .name()
                    .map(collapse_whitespace)
                    .unwrap_or_default();
            }
            NodeKind::Family => hierarchy.family = id_and_name(element),
            NodeKind::Class => {
                hierarchy.class_name = id_and_name(element);
                class_id = element.id().filter(|id| !id.is_empty());
            }
            _ => {}
        }
    }

    hierarchy.class_id = match class_id {
        Some(id) => id.to_string(),
        None => class_prefix(node.value().id().unwrap_or_default()).to_string(),
    };
    hierarchy.path = hierarchy_path(node);
    hierarchy
}

/// Catalog prefix of an element identifier: everything before the first `_`.
pub fn class_prefix(element_id: &str) -> &str {
    element_id.split('_').next().unwrap_or_default()
}

/// `>`-joined display labels of the node and its ancestors below the
/// catalog root, outermost first.
pub fn hierarchy_path(node: NodeRef<'_, RawElement>) -> String {
    let mut labels: Vec<String> = std::iter::once(node)
        .chain(node.ancestors())
        .filter(|n| n.value().kind != NodeKind::Catalog)
        .map(|n| node_label(n.value()))
        .collect();
    labels.reverse();
    labels.join(PATH_SEPARATOR)
}

fn id_and_name(element: &RawElement) -> String {
    let id = element.id().map(str::trim).filter(|s| !s.is_empty());
    let name = element
        .name()
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty());
    match (id, name) {
        (Some(id), Some(name)) => format!("{id} - {name}"),
        (Some(id), None) => id.to_string(),
        (None, Some(name)) => name,
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_stops_at_first_separator() {
        assert_eq!(class_prefix("fau_gen.1.1"), "fau");
        assert_eq!(class_prefix("ava_van.5.3e"), "ava");
        assert_eq!(class_prefix("plain"), "plain");
        assert_eq!(class_prefix(""), "");
    }
}
