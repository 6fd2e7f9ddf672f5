pub mod category;
pub mod document;
pub mod element_list;
pub mod hierarchy;
pub mod records;
pub mod text;
pub mod tree;

use crate::error::CatalogError;
use crate::types::CatalogOutput;
use document::CatalogDocument;

/// Loads a catalog and produces the display tree plus the flat record sets.
/// Fails without partial output on malformed XML or a wrong root tag.
pub fn transform(xml: &str) -> Result<CatalogOutput, CatalogError> {
    let doc = CatalogDocument::parse(xml)?;
    Ok(transform_document(&doc))
}

pub fn transform_document(doc: &CatalogDocument) -> CatalogOutput {
    let tree = tree::build_tree(doc);
    let emitted = records::emit_records(doc);
    CatalogOutput {
        tree,
        records: emitted.records,
        element_lists: emitted.element_lists,
    }
}
