//! Accessible labels for landmarks

use lnav_dom::{Document, NodeId};

/// Label of a node: `aria-label` verbatim, else the text of the elements
/// named by `aria-labelledby`. Ids that do not resolve are skipped; if none
/// resolve there is no label.
pub fn get_label(document: &Document, node: NodeId) -> Option<String> {
    let tree = document.tree();
    if let Some(label) = tree.get_attribute(node, "aria-label") {
        return Some(label.to_string());
    }

    let ids = tree.get_attribute(node, "aria-labelledby")?;
    let parts: Vec<String> = ids
        .split_whitespace()
        .filter_map(|id| {
            let target = document.get_element_by_id(id);
            if target.is_none() {
                tracing::trace!("aria-labelledby target {:?} not found", id);
            }
            target
        })
        .map(|target| rendered_text(document, target))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Visible text of a node, falling back to raw text content
fn rendered_text(document: &Document, node: NodeId) -> String {
    let tree = document.tree();
    tree.inner_text(node)
        .unwrap_or_else(|| tree.text_content(node))
}
