//! DOM Tree (arena-based allocation)

use crate::{DomError, ElementData, InlineStyle, Node, NodeData, NodeId};

/// Subtrees never exposed through the rendered text projection
const NON_RENDERED_TAGS: &[&str] = &["head", "script", "style", "template", "noscript"];

/// Elements laid out as blocks; their edges break words in rendered text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "details", "dialog", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "td", "th", "tr", "ul",
];

/// Elements that take focus without a `tabindex`
const NATIVELY_FOCUSABLE: &[&str] = &["button", "input", "select", "textarea", "iframe", "summary"];

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    /// Currently focused element (document.activeElement)
    focused: NodeId,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            focused: NodeId::NONE,
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (detached ones included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the document node exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    /// Create a detached doctype
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name))
    }

    /// Append `child` as the last child of `parent`, moving it if already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::InvalidNode(parent))?;
        if !matches!(parent_node.data, NodeData::Document | NodeData::Element(_)) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if self.get(child).is_none() {
            return Err(DomError::InvalidNode(child));
        }
        if child == parent || child == NodeId::ROOT || self.is_descendant(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.link_last(parent, child);

        tracing::trace!("append {} -> {}", child, parent);
        Ok(())
    }

    /// Link a detached node as the last child of `parent`. Both ids must be
    /// live and the link must not form a cycle.
    pub(crate) fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Unlink a subtree from its parent. The nodes stay in the arena.
    /// Detaching an already detached node is a no-op.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if self.focused.is_valid() && (self.focused == id || self.is_descendant(id, self.focused)) {
            self.focused = NodeId::NONE;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;

        tracing::trace!("detached {} from {}", id, parent);
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate over the ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id).unwrap_or(NodeId::NONE),
        }
    }

    /// True if `node` sits strictly below `ancestor`
    pub fn is_descendant(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// True if the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || (self.get(id).is_some() && self.is_descendant(NodeId::ROOT, id))
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        self.get_mut(id)
            .ok_or(DomError::InvalidNode(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Lower-case tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::tag_name)
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute, returning the old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    /// Read an inline style property
    pub fn style_property(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style().get_property(name))
    }

    /// Mutate an element's inline style
    pub fn update_style<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut InlineStyle) -> R,
    ) -> Result<R, DomError> {
        Ok(self.element_mut(id)?.update_style(f))
    }

    /// Concatenated text of every descendant text node (`textContent`)
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(text)) => out.push_str(text),
            Some(NodeData::Element(_)) | Some(NodeData::Document) => {
                for (child, _) in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    /// Rendered text (`innerText`): skips hidden and non-rendered subtrees and
    /// collapses whitespace. `None` when the node is not part of the document,
    /// since there is no rendering to project from.
    pub fn inner_text(&self, id: NodeId) -> Option<String> {
        if !self.is_connected(id) {
            return None;
        }
        let mut raw = String::new();
        self.collect_rendered_text(id, &mut raw);
        Some(raw.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    fn collect_rendered_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(text)) => {
                out.push_str(text);
            }
            Some(NodeData::Element(elem)) => {
                if elem.has_attr("hidden") || NON_RENDERED_TAGS.contains(&elem.tag_name()) {
                    return;
                }
                let block = BLOCK_TAGS.contains(&elem.tag_name());
                if block {
                    out.push(' ');
                }
                for (child, _) in self.children(id) {
                    self.collect_rendered_text(child, out);
                }
                if block {
                    out.push(' ');
                }
            }
            Some(NodeData::Document) => {
                for (child, _) in self.children(id) {
                    self.collect_rendered_text(child, out);
                }
            }
            _ => {}
        }
    }

    /// Whether `focus()` on this node would take effect
    pub fn is_focusable(&self, id: NodeId) -> bool {
        let Some(elem) = self.element(id) else {
            return false;
        };
        if elem.get_attr("tabindex").is_some_and(|v| v.trim().parse::<i32>().is_ok()) {
            return true;
        }
        match elem.tag_name() {
            "a" | "area" => elem.has_attr("href"),
            tag => NATIVELY_FOCUSABLE.contains(&tag),
        }
    }

    /// Move focus to a node. Returns false (focus unchanged) if the node is
    /// detached or not focusable.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_connected(id) || !self.is_focusable(id) {
            tracing::trace!("focus({}) ignored: not focusable", id);
            return false;
        }
        self.focused = id;
        true
    }

    /// Drop focus from whatever holds it
    pub fn blur(&mut self) {
        self.focused = NodeId::NONE;
    }

    /// Currently focused element
    pub fn active_element(&self) -> Option<NodeId> {
        Some(self.focused).filter(|f| f.is_valid())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Child iterator yielding `(id, node)` pairs
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Ancestor iterator, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        let nav = tree.create_element("nav");
        let text = tree.create_text("Menu");
        tree.append_child(tree.root(), body).unwrap();
        tree.append_child(body, nav).unwrap();
        tree.append_child(nav, text).unwrap();
        (tree, body, nav, text)
    }

    #[test]
    fn test_append_and_children() {
        let (tree, body, nav, _) = sample();
        let kids: Vec<_> = tree.children(body).map(|(id, _)| id).collect();
        assert_eq!(kids, vec![nav]);
        assert_eq!(tree.parent(nav), Some(body));
        assert!(tree.is_descendant(body, nav));
        assert!(!tree.is_descendant(nav, body));
    }

    #[test]
    fn test_cycle_rejected() {
        let (mut tree, body, nav, text) = sample();
        assert!(matches!(
            tree.append_child(nav, body),
            Err(DomError::HierarchyRequest { .. })
        ));
        let span = tree.create_element("span");
        assert!(tree.append_child(text, span).is_err());
    }

    #[test]
    fn test_detach_clears_focus() {
        let (mut tree, body, nav, _) = sample();
        tree.set_attribute(nav, "tabindex", "-1").unwrap();
        assert!(tree.focus(nav));
        tree.detach(nav);
        assert_eq!(tree.active_element(), None);
        assert!(!tree.is_connected(nav));
        assert_eq!(tree.children(body).count(), 0);
        // second detach is harmless
        tree.detach(nav);
    }

    #[test]
    fn test_focus_requires_tabindex() {
        let (mut tree, _, nav, _) = sample();
        assert!(!tree.focus(nav));
        tree.set_attribute(nav, "tabindex", "-1").unwrap();
        assert!(tree.focus(nav));
        assert_eq!(tree.active_element(), Some(nav));
    }

    #[test]
    fn test_inner_text_skips_hidden() {
        let (mut tree, body, nav, _) = sample();
        let hidden = tree.create_element("span");
        tree.set_attribute(hidden, "hidden", "").unwrap();
        let secret = tree.create_text("secret");
        tree.append_child(hidden, secret).unwrap();
        tree.append_child(nav, hidden).unwrap();

        assert_eq!(tree.inner_text(body).as_deref(), Some("Menu"));
        assert_eq!(tree.text_content(body), "Menusecret");

        tree.detach(nav);
        assert_eq!(tree.inner_text(nav), None);
    }

    #[test]
    fn test_inner_text_joins_inline_runs() {
        let (mut tree, body, nav, _) = sample();
        let h2 = tree.create_element("h2");
        let foo = tree.create_text("Foo");
        let b = tree.create_element("b");
        let bar = tree.create_text("bar");
        tree.append_child(body, h2).unwrap();
        tree.append_child(h2, foo).unwrap();
        tree.append_child(h2, b).unwrap();
        tree.append_child(b, bar).unwrap();

        assert_eq!(tree.inner_text(h2).as_deref(), Some("Foobar"));
        // nav and h2 are blocks, so their words stay apart
        assert_eq!(tree.inner_text(body).as_deref(), Some("Menu Foobar"));
        assert_eq!(tree.inner_text(nav).as_deref(), Some("Menu"));
    }
}
