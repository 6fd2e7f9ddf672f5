//! Linearizes mixed content (text, operator spans, nested elements and tail
//! text) into one normalized requirement string.

use super::document::{NodeKind, RawElement, RequirementKind};
use ego_tree::NodeRef;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Evidence mode hides work-unit and detail subtrees, keeping only their tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Full,
    Evidence,
}

impl TextMode {
    /// Evidence mode applies to assurance evidence elements and everything
    /// beneath them.
    pub fn for_node(node: NodeRef<'_, RawElement>) -> Self {
        let in_evidence = std::iter::once(node)
            .chain(node.ancestors())
            .any(|n| n.value().kind == NodeKind::Requirement(RequirementKind::Evidence));
        if in_evidence {
            TextMode::Evidence
        } else {
            TextMode::Full
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Walk {
    mode: TextMode,
    /// Set while reading selection options: nested assignments are reported
    /// after the options instead of inline.
    in_option: bool,
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Reconstructs the effective text of `node`, picking the mode from the node
/// and its ancestors.
pub fn reconstruct(node: NodeRef<'_, RawElement>) -> String {
    reconstruct_with(node, TextMode::for_node(node))
}

pub fn reconstruct_with(node: NodeRef<'_, RawElement>, mode: TextMode) -> String {
    text_of(
        node,
        Walk {
            mode,
            in_option: false,
        },
    )
}

fn collect(node: NodeRef<'_, RawElement>, walk: Walk, out: &mut Vec<String>) {
    push_fragment(out, &node.value().text);

    let owner = node.value().kind;
    for child in node.children() {
        let element = child.value();
        match element.kind {
            NodeKind::Assignment if walk.in_option => {}
            NodeKind::Assignment => {
                if let Some(text) = assignment_text(child, walk) {
                    out.push(format!("[assignment: {text}]"));
                }
            }
            NodeKind::Selection => {
                if let Some(text) = selection_text(child, walk) {
                    out.push(format!("[selection: {text}]"));
                }
            }
            // Lists directly under a requirement are extracted as element list entries.
            NodeKind::List if matches!(owner, NodeKind::Requirement(_)) => {}
            NodeKind::Detail if walk.mode == TextMode::Evidence => {}
            _ => collect(child, walk, out),
        }
        push_fragment(out, &element.tail);
    }
}

fn push_fragment(out: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn text_of(node: NodeRef<'_, RawElement>, walk: Walk) -> String {
    let mut fragments = Vec::new();
    collect(node, walk, &mut fragments);
    collapse_whitespace(&fragments.join(" "))
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// Text of the assignment's item holder, or of the assignment itself when it
/// carries its text inline.
fn assignment_text(node: NodeRef<'_, RawElement>, walk: Walk) -> Option<String> {
    let walk = Walk {
        in_option: false,
        ..walk
    };
    let holder = node
        .children()
        .find(|c| c.value().kind == NodeKind::AssignmentItem);
    match holder {
        Some(holder) => non_empty(text_of(holder, walk)),
        None => non_empty(text_of(node, walk)),
    }
}

/// `"opt1, opt2[, [assignment: x], ...]"`, or `None` when no option has text.
fn selection_text(node: NodeRef<'_, RawElement>, walk: Walk) -> Option<String> {
    let mut options = Vec::new();
    collect_options(node, walk, &mut options);
    if options.is_empty() {
        return None;
    }

    let item_walk = Walk {
        in_option: false,
        ..walk
    };
    let mut items = Vec::new();
    assignment_items(node, &mut items);
    let assignments = items
        .into_iter()
        .filter_map(|item| non_empty(text_of(item, item_walk)))
        .map(|text| format!("[assignment: {text}]"));
    options.extend(assignments);
    Some(options.join(", "))
}

/// Assignment items beneath a selection. Nested selections render their own
/// assignments, so their subtrees are not searched.
fn assignment_items<'a>(
    node: NodeRef<'a, RawElement>,
    items: &mut Vec<NodeRef<'a, RawElement>>,
) {
    for child in node.children() {
        match child.value().kind {
            NodeKind::AssignmentItem => items.push(child),
            NodeKind::Selection => {}
            _ => assignment_items(child, items),
        }
    }
}

fn collect_options(node: NodeRef<'_, RawElement>, walk: Walk, options: &mut Vec<String>) {
    let option_walk = Walk {
        in_option: true,
        ..walk
    };
    for child in node.children() {
        match child.value().kind {
            NodeKind::SelectionItem => {
                if let Some(text) = non_empty(text_of(child, option_walk)) {
                    options.push(text);
                }
            }
            NodeKind::SelectionNotes => collect_options(child, walk, options),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::document::CatalogDocument;

    fn first_child_text(xml: &str) -> String {
        let doc = CatalogDocument::parse(xml).unwrap();
        let child = doc.root().first_child().unwrap();
        reconstruct(child)
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace("\n"), "");
    }

    #[test]
    fn reconstructs_inline_assignment_with_tail() {
        let text = first_child_text(
            "<cc><f-element id=\"x.1\">The TSF shall record
                <fe-assignment><fe-assignmentitem>list of events</fe-assignmentitem></fe-assignment>
                for each user.</f-element></cc>",
        );
        assert_eq!(
            text,
            "The TSF shall record [assignment: list of events] for each user."
        );
    }

    #[test]
    fn assignment_without_item_uses_inline_text() {
        let text =
            first_child_text("<cc><f-element>Use <assignment>a key</assignment></f-element></cc>");
        assert_eq!(text, "Use [assignment: a key]");
    }

    #[test]
    fn empty_selection_contributes_nothing() {
        let text = first_child_text(
            "<cc><f-element>Pick <selection><selectionitem> </selectionitem></selection> now</f-element></cc>",
        );
        assert_eq!(text, "Pick now");
    }

    #[test]
    fn selection_notes_contribute_options() {
        let text = first_child_text(
            "<cc><f-element>Use <fe-selection><fe-selectionitem>a</fe-selectionitem>\
             <fe-selectionnotes><fe-selectionitem>b</fe-selectionitem></fe-selectionnotes>\
             </fe-selection></f-element></cc>",
        );
        assert_eq!(text, "Use [selection: a, b]");
    }
}
