//! Landmark Scanner
//!
//! Depth-first, pre-order walk of the element tree collecting landmark
//! regions with their nesting depth and menu label.

use crate::aria::{resolve_role, AriaRole};
use crate::label::get_label;
use lnav_dom::{Document, NodeId};

/// A landmark found by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkEntry {
    /// The landmark element. Only valid against the document it was scanned from.
    pub node: NodeId,
    pub role: AriaRole,
    /// Number of enclosing landmarks, offset by the scan's base depth
    pub depth: usize,
    pub label: Option<String>,
}

impl LandmarkEntry {
    /// Menu text: one hyphen per depth level, the role, then `: label` if labelled
    pub fn display_label(&self) -> String {
        let mut text = "-".repeat(self.depth);
        text.push_str(self.role.as_str());
        if let Some(label) = &self.label {
            text.push_str(": ");
            text.push_str(label);
        }
        text
    }
}

/// Scan the page content of a document from depth 0
pub fn scan_document(document: &Document) -> Vec<LandmarkEntry> {
    scan(document, document.content_root(), 0)
}

/// Scan the descendants of `root` (the root itself is not classified).
/// Landmarks directly under `root` start at `base_depth`.
pub fn scan(document: &Document, root: NodeId, base_depth: usize) -> Vec<LandmarkEntry> {
    let entries = scan_children(document, root, base_depth, None);
    tracing::debug!("Scanned {} landmarks under {}", entries.len(), root);
    entries
}

/// Walk the children of `parent`. `last` is the landmark found most recently
/// anywhere in the walk so far.
///
/// A landmark that lies inside `last` bumps `depth` by one, and the bump
/// stays in effect for the remaining siblings of this level. Children are
/// walked with the level's current depth.
fn scan_children(
    document: &Document,
    parent: NodeId,
    mut depth: usize,
    mut last: Option<NodeId>,
) -> Vec<LandmarkEntry> {
    let tree = document.tree();
    let mut entries = Vec::new();

    for (child, node) in tree.children(parent) {
        if !node.is_element() {
            continue;
        }
        if let Some((role, label)) = classify(document, child) {
            if last.is_some_and(|l| tree.is_descendant(l, child)) {
                depth += 1;
            }
            entries.push(LandmarkEntry {
                node: child,
                role,
                depth,
                label,
            });
            last = Some(child);
        }

        let nested = scan_children(document, child, depth, last);
        if let Some(found) = nested.last() {
            last = Some(found.node);
        }
        entries.extend(nested);
    }
    entries
}

/// Role and label of a node if it is a landmark
fn classify(document: &Document, node: NodeId) -> Option<(AriaRole, Option<String>)> {
    let role = resolve_role(document.tree(), node)?;
    let label = get_label(document, node);

    let landmark = role.is_landmark()
        || (role.requires_label() && label.as_deref().is_some_and(|l| !l.is_empty()));
    if !landmark {
        tracing::trace!("{} has role {} but is not a landmark", node, role);
        return None;
    }
    Some((role, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let tree = doc.tree_mut();
        let id = tree.create_element(tag);
        for (k, v) in attrs {
            tree.set_attribute(id, k, v).unwrap();
        }
        tree.append_child(parent, id).unwrap();
        id
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert!(scan_document(&doc).is_empty());

        let bare = Document::empty("about:blank");
        assert!(scan_document(&bare).is_empty());
    }

    #[test]
    fn test_nested_depth_and_labels() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let header = el(&mut doc, body, "header", &[]);
        let main = el(&mut doc, body, "main", &[]);
        let wrapper = el(&mut doc, main, "div", &[]);
        let nav = el(&mut doc, wrapper, "nav", &[("aria-label", "Chapters")]);
        let aside = el(&mut doc, main, "aside", &[]);
        let footer = el(&mut doc, body, "footer", &[]);

        let entries = scan_document(&doc);
        let nodes: Vec<_> = entries.iter().map(|e| e.node).collect();
        assert_eq!(nodes, vec![header, main, nav, aside, footer]);

        let labels: Vec<_> = entries.iter().map(LandmarkEntry::display_label).collect();
        assert_eq!(
            labels,
            vec![
                "banner",
                "main",
                "-navigation: Chapters",
                "complementary",
                "contentinfo",
            ]
        );
    }

    #[test]
    fn test_depth_carries_to_later_siblings() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let main = el(&mut doc, body, "main", &[]);
        el(&mut doc, main, "nav", &[]);
        el(&mut doc, main, "aside", &[]);
        let search = el(&mut doc, main, "div", &[("role", "search")]);
        el(&mut doc, search, "div", &[("role", "region"), ("aria-label", "Results")]);
        el(&mut doc, body, "footer", &[]);

        let labels: Vec<_> = scan_document(&doc).iter().map(LandmarkEntry::display_label).collect();
        assert_eq!(
            labels,
            vec![
                "main",
                "-navigation",
                "-complementary",
                "-search",
                "--region: Results",
                "contentinfo",
            ]
        );
    }

    #[test]
    fn test_wrapper_resets_depth_for_later_siblings() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let main = el(&mut doc, body, "main", &[]);
        let wrapper = el(&mut doc, main, "div", &[]);
        el(&mut doc, wrapper, "nav", &[]);
        el(&mut doc, main, "aside", &[]);

        let labels: Vec<_> = scan_document(&doc).iter().map(LandmarkEntry::display_label).collect();
        assert_eq!(labels, vec!["main", "-navigation", "complementary"]);
    }

    #[test]
    fn test_region_needs_label() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        el(&mut doc, body, "div", &[("role", "region")]);
        el(&mut doc, body, "div", &[("role", "region"), ("aria-label", "")]);
        let labelled = el(&mut doc, body, "div", &[("role", "region"), ("aria-label", "Promo")]);

        let entries = scan_document(&doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].node, labelled);
        assert_eq!(entries[0].display_label(), "region: Promo");
    }

    #[test]
    fn test_children_of_non_landmark_role_still_visited() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let list = el(&mut doc, body, "nav", &[("role", "list")]);
        let search = el(&mut doc, list, "form", &[("role", "search")]);

        let entries = scan_document(&doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].node, search);
        assert_eq!(entries[0].role, AriaRole::Search);
        assert_eq!(entries[0].depth, 0);
    }

    #[test]
    fn test_base_depth_offsets() {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let main = el(&mut doc, body, "main", &[]);
        el(&mut doc, main, "nav", &[]);

        let entries = scan(&doc, body, 2);
        assert_eq!(entries[0].depth, 2);
        assert_eq!(entries[1].depth, 3);
        assert_eq!(entries[1].display_label(), "---navigation");
    }
}
