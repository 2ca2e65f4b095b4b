//! Reading NOS XML responses
//!
//! Every interface document uses the brocade-interface namespace. Lookups
//! walk direct children from the document element, so a missing level
//! anywhere in the path reads as "not configured".

use roxmltree::{Document, Node};
use vlan_core::{Error, Result};

/// Namespace of the brocade-interface YANG module
pub const BROCADE_INTERFACE_NS: &str = "urn:brocade.com:mgmt:brocade-interface";

/// Parse a response body
pub(crate) fn parse(body: &str) -> Result<Document<'_>> {
    Document::parse(body).map_err(|e| Error::malformed(format!("Invalid XML: {}", e)))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| {
        n.is_element()
            && n.tag_name().name() == name
            && n.tag_name().namespace() == Some(BROCADE_INTERFACE_NS)
    })
}

/// Text of the element at `path` below the document element
///
/// Returns `None` when any element on the path is absent, and `Some("")`
/// for an element that is present but empty.
pub(crate) fn child_text<'a>(doc: &'a Document<'_>, path: &[&str]) -> Option<&'a str> {
    let mut node = doc.root_element();
    for name in path {
        node = child(node, name)?;
    }
    Some(node.text().map(str::trim).unwrap_or(""))
}
