//! Display tree mirroring the catalog's class/family/component/element nesting.

use super::document::{CatalogDocument, NodeKind, RawElement};
use super::element_list::list_item_texts;
use super::text::{collapse_whitespace, reconstruct, TextMode};
use crate::types::TreeNode;
use ego_tree::NodeRef;
use std::collections::BTreeMap;

pub const ROOT_LABEL: &str = "Root";

/// Label for class, family and package tags: `name`/`id` values are appended
/// in attribute order, every other attribute is folded into one `k=v` suffix.
/// Whitespace is collapsed for classes and families only.
pub fn structural_label(element: &RawElement) -> String {
    let mut label = element.tag.clone();
    let mut extra = Vec::new();
    for (key, value) in &element.attributes {
        if key == "name" || key == "id" {
            label.push_str(" - ");
            label.push_str(value);
        } else {
            extra.push(format!("{key}={value}"));
        }
    }
    if !extra.is_empty() {
        label.push_str(" - ");
        label.push_str(&extra.join(" "));
    }
    match element.kind {
        NodeKind::Class | NodeKind::Family => collapse_whitespace(&label),
        _ => label,
    }
}

/// Label for every other tag: the tag name, plus `" - id"` when present.
pub fn generic_label(element: &RawElement) -> String {
    match element.id() {
        Some(id) => format!("{} - {id}", element.tag),
        None => element.tag.clone(),
    }
}

pub fn node_label(element: &RawElement) -> String {
    if element.kind.is_structural() {
        structural_label(element)
    } else {
        generic_label(element)
    }
}

/// Builds the display tree. Only classes and packages directly under the
/// catalog root are visited.
pub fn build_tree(doc: &CatalogDocument) -> TreeNode {
    let mut root = TreeNode::new(ROOT_LABEL);
    root.children = doc
        .root()
        .children()
        .filter(|child| matches!(child.value().kind, NodeKind::Class | NodeKind::Package))
        .map(structural_node)
        .collect();
    root
}

fn attribute_map(element: &RawElement) -> BTreeMap<String, String> {
    element.attributes.iter().cloned().collect()
}

fn structural_node(node: NodeRef<'_, RawElement>) -> TreeNode {
    let element = node.value();
    let mut tree_node = TreeNode::new(structural_label(element));
    tree_node.attributes = attribute_map(element);
    add_children(&mut tree_node, node);
    tree_node
}

fn add_children(parent: &mut TreeNode, node: NodeRef<'_, RawElement>) {
    for child in node.children() {
        let tree_child = if child.value().kind.is_structural() {
            structural_node(child)
        } else {
            generic_node(child)
        };
        parent.children.push(tree_child);
    }
}

fn generic_node(node: NodeRef<'_, RawElement>) -> TreeNode {
    let element = node.value();
    let mut tree_node = TreeNode::new(generic_label(element));
    tree_node.attributes = attribute_map(element);
    for (key, value) in &element.attributes {
        if key != "id" {
            tree_node.children.push(TreeNode::new(format!("{key} = {value}")));
        }
    }

    match element.kind {
        NodeKind::Requirement(_) => add_requirement_content(&mut tree_node, node),
        _ if has_mixed_content(node) => push_text_leaf(&mut tree_node, reconstruct(node)),
        _ => add_children(&mut tree_node, node),
    }
    tree_node
}

/// Requirement text becomes one leaf. List items follow as their own leaves,
/// and in evidence elements the hidden detail subtrees stay visible as nodes.
fn add_requirement_content(tree_node: &mut TreeNode, node: NodeRef<'_, RawElement>) {
    push_text_leaf(tree_node, reconstruct(node));
    let evidence = TextMode::for_node(node) == TextMode::Evidence;
    for child in node.children() {
        match child.value().kind {
            NodeKind::List => {
                for text in list_item_texts(child) {
                    tree_node.children.push(TreeNode::leaf(text));
                }
            }
            NodeKind::Detail if evidence => tree_node.children.push(generic_node(child)),
            _ => {}
        }
    }
}

fn push_text_leaf(tree_node: &mut TreeNode, text: String) {
    if !text.is_empty() {
        tree_node.children.push(TreeNode::leaf(text));
    }
}

/// Text interleaved with child elements is reconstructed as a whole rather
/// than split across child nodes.
fn has_mixed_content(node: NodeRef<'_, RawElement>) -> bool {
    !node.value().text.trim().is_empty()
        || node
            .children()
            .any(|child| !child.value().tail.trim().is_empty())
}
