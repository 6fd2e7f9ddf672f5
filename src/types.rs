use crate::catalog::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display tree node. The root is a synthetic `Root` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_data: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            leaf_data: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// A node holding literal reconstructed text.
    pub fn leaf(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            leaf_data: Some(text),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf_data.is_some()
    }

    /// Finds the first child whose label matches exactly.
    pub fn child(&self, label: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.label == label)
    }

    /// Follows a `>`-separated label path from this node.
    pub fn find_path(&self, path: &str) -> Option<&TreeNode> {
        path.split('>')
            .try_fold(self, |node, label| node.child(label))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub class_name: String,
    pub class_id: String,
    pub family: String,
    pub component: String,
    pub component_name: String,
    pub element: String,
    pub element_item: String,
    pub category: Category,
}

impl ClassificationRecord {
    pub fn is_valid(&self) -> bool {
        !self.element.is_empty() && !self.element_item.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementListEntry {
    pub element: String,
    pub element_index: String,
    pub order: usize,
    pub item_list: String,
    pub item_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOutput {
    pub tree: TreeNode,
    pub records: Vec<ClassificationRecord>,
    pub element_lists: Vec<ElementListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedElement {
    pub element: String,
    pub main_text: String,
    pub items: Vec<String>,
    pub formatted_display: String,
}
