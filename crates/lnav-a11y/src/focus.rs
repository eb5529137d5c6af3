//! Focus Management
//!
//! Programmatic focus of landmark elements and the outline highlight.

use lnav_dom::{DomError, DomTree, NodeId};

/// `tabindex` value that allows script focus without joining the tab order
pub const PROGRAMMATIC_ONLY: &str = "-1";

/// Focus a node that may not normally take focus.
///
/// A node without `tabindex` (or with `tabindex="0"`) gets the
/// programmatic-only value for the duration of the focus call; the original
/// attribute state is restored afterwards whether or not focus moved.
pub fn focus_programmatically(tree: &mut DomTree, node: NodeId) -> Result<bool, DomError> {
    let original = tree.get_attribute(node, "tabindex").map(str::to_owned);
    let patched = matches!(original.as_deref(), None | Some("0"));

    if patched {
        tree.set_attribute(node, "tabindex", PROGRAMMATIC_ONLY)?;
    }

    let focused = tree.focus(node);

    if patched {
        match original {
            None => {
                tree.remove_attribute(node, "tabindex")?;
            }
            Some(value) => tree.set_attribute(node, "tabindex", &value)?,
        }
    }

    tracing::trace!("focus {} -> {}", node, focused);
    Ok(focused)
}

/// Outline drawn around the focused landmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusIndicator {
    pub color: String,
    pub width: String,
    pub style: String,
}

impl FocusIndicator {
    /// `outline` shorthand value
    pub fn outline(&self) -> String {
        format!("{} {} {}", self.width, self.style, self.color)
    }

    /// Draw the outline on a node
    pub fn apply(&self, tree: &mut DomTree, node: NodeId) -> Result<(), DomError> {
        let value = self.outline();
        tree.update_style(node, |s| s.set_property("outline", &value))
    }
}

impl Default for FocusIndicator {
    fn default() -> Self {
        Self {
            color: "red".to_string(),
            width: "medium".to_string(),
            style: "solid".to_string(),
        }
    }
}

/// Clear the outline from a node. Missing, detached or already clean nodes
/// are left alone.
pub fn remove_highlight(tree: &mut DomTree, node: NodeId) {
    if !tree.is_connected(node) || tree.style_property(node, "outline").is_none() {
        return;
    }
    if let Err(err) = tree.update_style(node, |s| s.remove_property("outline")) {
        tracing::debug!("highlight removal skipped: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_main() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let main = tree.create_element("main");
        tree.append_child(tree.root(), main).unwrap();
        (tree, main)
    }

    #[test]
    fn test_absent_tabindex_restored() {
        let (mut tree, main) = tree_with_main();
        assert!(focus_programmatically(&mut tree, main).unwrap());
        assert_eq!(tree.active_element(), Some(main));
        assert!(!tree.has_attribute(main, "tabindex"));
    }

    #[test]
    fn test_zero_tabindex_restored() {
        let (mut tree, main) = tree_with_main();
        tree.set_attribute(main, "tabindex", "0").unwrap();
        assert!(focus_programmatically(&mut tree, main).unwrap());
        assert_eq!(tree.get_attribute(main, "tabindex"), Some("0"));
    }

    #[test]
    fn test_positive_tabindex_untouched() {
        let (mut tree, main) = tree_with_main();
        tree.set_attribute(main, "tabindex", "3").unwrap();
        assert!(focus_programmatically(&mut tree, main).unwrap());
        assert_eq!(tree.get_attribute(main, "tabindex"), Some("3"));
    }

    #[test]
    fn test_restored_even_when_focus_fails() {
        let (mut tree, main) = tree_with_main();
        tree.detach(main);
        assert!(!focus_programmatically(&mut tree, main).unwrap());
        assert!(!tree.has_attribute(main, "tabindex"));
    }

    #[test]
    fn test_highlight_lifecycle() {
        let (mut tree, main) = tree_with_main();
        let indicator = FocusIndicator::default();
        assert_eq!(indicator.outline(), "medium solid red");

        indicator.apply(&mut tree, main).unwrap();
        assert_eq!(tree.style_property(main, "outline"), Some("medium solid red"));

        remove_highlight(&mut tree, main);
        remove_highlight(&mut tree, main);
        assert_eq!(tree.style_property(main, "outline"), None);

        remove_highlight(&mut tree, NodeId::NONE);
    }
}
