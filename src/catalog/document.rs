use crate::error::CatalogError;
use ego_tree::{NodeId, NodeRef, Tree};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub const CATALOG_ROOT_TAG: &str = "cc";

/// Whether a requirement element belongs to the functional or the assurance
/// evidence vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    Functional,
    Evidence,
}

/// Tag vocabulary after folding the legacy `fe-*` spellings onto the current
/// ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Catalog,
    /// `eal` / `cap` packages: top-level groupings that are not classes.
    Package,
    Class,
    Family,
    Component,
    Requirement(RequirementKind),
    Assignment,
    AssignmentItem,
    Selection,
    SelectionItem,
    SelectionNotes,
    List,
    ListItem,
    /// Work-unit and detail subtrees hidden from evidence text.
    Detail,
    Other,
}

impl NodeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            CATALOG_ROOT_TAG => NodeKind::Catalog,
            "eal" | "cap" => NodeKind::Package,
            "f-class" | "a-class" => NodeKind::Class,
            "f-family" | "a-family" => NodeKind::Family,
            "f-component" | "a-component" => NodeKind::Component,
            "f-element" => NodeKind::Requirement(RequirementKind::Functional),
            "fe-assignment" | "assignment" => NodeKind::Assignment,
            "fe-assignmentitem" | "assignmentitem" => NodeKind::AssignmentItem,
            "fe-selection" | "selection" => NodeKind::Selection,
            "fe-selectionitem" | "selectionitem" => NodeKind::SelectionItem,
            "fe-selectionnotes" | "selectionnotes" => NodeKind::SelectionNotes,
            "fe-list" | "list" => NodeKind::List,
            "fe-item" | "item" => NodeKind::ListItem,
            "detail" => NodeKind::Detail,
            _ if tag.starts_with("ae-") => NodeKind::Requirement(RequirementKind::Evidence),
            _ if tag.contains("workunit") => NodeKind::Detail,
            _ => NodeKind::Other,
        }
    }

    /// Tags rendered with the structural label rule in the display tree.
    pub fn is_structural(self) -> bool {
        matches!(self, NodeKind::Package | NodeKind::Class | NodeKind::Family)
    }
}

/// One element of the loaded catalog, in the text/tail model: `text` is the
/// character data before the first child, `tail` the character data between
/// this element's end tag and the next sibling (or the parent's end tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    pub tag: String,
    pub kind: NodeKind,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub tail: String,
}

impl RawElement {
    fn from_start(start: &BytesStart<'_>, position: u64) -> Result<Self, CatalogError> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| CatalogError::malformed(position, e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| CatalogError::malformed(position, e))?
                .to_string();
            attributes.push((key, value));
        }
        Ok(Self {
            kind: NodeKind::from_tag(&tag),
            tag,
            attributes,
            text: String::new(),
            tail: String::new(),
        })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }
}

/// Arena-backed catalog. Parent and child links are indices into the arena,
/// so ancestor walks never touch the original XML.
#[derive(Debug, Clone)]
pub struct CatalogDocument {
    tree: Tree<RawElement>,
}

impl CatalogDocument {
    /// Parses well-formed XML and checks the root tag. Unknown tags are kept
    /// as `NodeKind::Other`.
    pub fn parse(xml: &str) -> Result<Self, CatalogError> {
        let tree = build_tree(xml)?;
        let root_tag = &tree.root().value().tag;
        if root_tag != CATALOG_ROOT_TAG {
            return Err(CatalogError::UnexpectedRoot {
                found: root_tag.clone(),
            });
        }
        Ok(Self { tree })
    }

    pub fn root(&self) -> NodeRef<'_, RawElement> {
        self.tree.root()
    }

    /// Requirement elements in document order.
    pub fn requirement_elements(&self) -> impl Iterator<Item = NodeRef<'_, RawElement>> {
        self.tree
            .root()
            .descendants()
            .filter(|node| matches!(node.value().kind, NodeKind::Requirement(_)))
    }

    /// First element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeRef<'_, RawElement>> {
        self.tree
            .root()
            .descendants()
            .find(|node| node.value().id() == Some(id))
    }
}

fn build_tree(xml: &str) -> Result<Tree<RawElement>, CatalogError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut tree: Option<Tree<RawElement>> = None;
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root_closed = false;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| CatalogError::malformed(reader.error_position(), e))?;
        let position = reader.buffer_position();
        match event {
            Event::Start(ref start) => {
                if root_closed {
                    return Err(CatalogError::malformed(position, "multiple root elements"));
                }
                let element = RawElement::from_start(start, position)?;
                let id = open_element(&mut tree, &stack, element);
                stack.push(id);
            }
            Event::Empty(ref start) => {
                if root_closed {
                    return Err(CatalogError::malformed(position, "multiple root elements"));
                }
                let element = RawElement::from_start(start, position)?;
                open_element(&mut tree, &stack, element);
                if stack.is_empty() {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                if stack.pop().is_none() {
                    return Err(CatalogError::malformed(position, "unmatched end tag"));
                }
                if stack.is_empty() {
                    root_closed = true;
                }
            }
            Event::Text(ref text) => {
                let unescaped = text
                    .unescape()
                    .map_err(|e| CatalogError::malformed(position, e))?;
                push_text(&mut tree, &stack, &unescaped, position)?;
            }
            Event::CData(ref cdata) => {
                let raw = String::from_utf8_lossy(cdata.as_ref()).to_string();
                push_text(&mut tree, &stack, &raw, position)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(CatalogError::malformed(
            reader.buffer_position(),
            "unexpected end of input inside an element",
        ));
    }
    tree.ok_or_else(|| CatalogError::MalformedInput("document has no root element".to_string()))
}

fn open_element(
    tree: &mut Option<Tree<RawElement>>,
    stack: &[NodeId],
    element: RawElement,
) -> NodeId {
    match (tree.as_mut(), stack.last()) {
        (Some(tree), Some(&parent)) => match tree.get_mut(parent) {
            Some(mut parent) => parent.append(element).id(),
            None => tree.root_mut().append(element).id(),
        },
        (Some(tree), None) => tree.root().id(),
        (None, _) => {
            let new_tree = Tree::new(element);
            let id = new_tree.root().id();
            *tree = Some(new_tree);
            id
        }
    }
}

/// Character data goes to the open element's `text` until it has a child,
/// after which it belongs to the last child's `tail`.
fn push_text(
    tree: &mut Option<Tree<RawElement>>,
    stack: &[NodeId],
    text: &str,
    position: u64,
) -> Result<(), CatalogError> {
    let (Some(tree), Some(&open)) = (tree.as_mut(), stack.last()) else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(CatalogError::malformed(
            position,
            "text outside the root element",
        ));
    };

    let target = tree
        .get(open)
        .and_then(|node| node.last_child())
        .map_or(open, |child| child.id());
    let is_tail = target != open;
    if let Some(mut node) = tree.get_mut(target) {
        let value = node.value();
        if is_tail {
            value.tail.push_str(text);
        } else {
            value.text.push_str(text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_legacy_and_current_operator_tags() {
        assert_eq!(NodeKind::from_tag("fe-selection"), NodeKind::Selection);
        assert_eq!(NodeKind::from_tag("selection"), NodeKind::Selection);
        assert_eq!(NodeKind::from_tag("fe-assignmentitem"), NodeKind::AssignmentItem);
        assert_eq!(NodeKind::from_tag("assignmentitem"), NodeKind::AssignmentItem);
        assert_eq!(NodeKind::from_tag("fe-list"), NodeKind::List);
        assert_eq!(
            NodeKind::from_tag("ae-evaluator"),
            NodeKind::Requirement(RequirementKind::Evidence)
        );
        assert_eq!(NodeKind::from_tag("aa-workunit"), NodeKind::Detail);
        assert_eq!(NodeKind::from_tag("detail"), NodeKind::Detail);
        assert_eq!(NodeKind::from_tag("details"), NodeKind::Other);
        assert_eq!(NodeKind::from_tag("f-note"), NodeKind::Other);
    }

    #[test]
    fn splits_text_and_tail() {
        let doc = CatalogDocument::parse("<cc>head<a>inner</a>tail<b/>end</cc>").unwrap();
        let root = doc.root();
        assert_eq!(root.value().text, "head");
        let children: Vec<_> = root.children().collect();
        assert_eq!(children[0].value().text, "inner");
        assert_eq!(children[0].value().tail, "tail");
        assert_eq!(children[1].value().tail, "end");
    }

    #[test]
    fn unescapes_entities_and_keeps_cdata() {
        let doc = CatalogDocument::parse("<cc a=\"x &amp; y\">1 &lt; 2<![CDATA[<raw>]]></cc>")
            .unwrap();
        assert_eq!(doc.root().value().attr("a"), Some("x & y"));
        assert_eq!(doc.root().value().text, "1 < 2<raw>");
    }

    #[test]
    fn rejects_unclosed_elements() {
        let err = CatalogDocument::parse("<cc><f-class>").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedInput(_)));
    }

    #[test]
    fn rejects_empty_input() {
        let err = CatalogDocument::parse("   ").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedInput(_)));
    }
}
