//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.link_last(tree.root(), html);
        tree.link_last(html, head);
        tree.link_last(html, body);

        doc.finalize();
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Recompute the cached html/head/body references after the tree was built
    pub fn finalize(&mut self) {
        self.html_element = self
            .tree
            .children(self.tree.root())
            .find(|(_, n)| n.as_element().is_some_and(|e| e.tag_name() == "html"))
            .map_or(NodeId::NONE, |(id, _)| id);
        self.head_element = self.child_with_tag(self.html_element, "head");
        self.body_element = self.child_with_tag(self.html_element, "body");
    }

    fn child_with_tag(&self, parent: NodeId, tag: &str) -> NodeId {
        if !parent.is_valid() {
            return NodeId::NONE;
        }
        self.tree
            .children(parent)
            .find(|(_, n)| n.as_element().is_some_and(|e| e.tag_name() == tag))
            .map_or(NodeId::NONE, |(id, _)| id)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .children(self.head_element)
            .find(|(_, n)| n.as_element().is_some_and(|e| e.tag_name() == "title"))
            .map(|(id, _)| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        Some(self.html_element).filter(|id| id.is_valid())
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        Some(self.head_element).filter(|id| id.is_valid())
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        Some(self.body_element).filter(|id| self.tree.is_connected(*id))
    }

    /// The node whose subtree holds the page content: body, else the html
    /// element, else the document node itself.
    pub fn content_root(&self) -> NodeId {
        self.body()
            .or_else(|| self.document_element())
            .unwrap_or_else(|| self.tree.root())
    }

    /// First connected element with the given id, in tree order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.find_element_with_id(self.tree.root(), id)
    }

    fn find_element_with_id(&self, start: NodeId, target_id: &str) -> Option<NodeId> {
        for (node_id, node) in self.tree.children(start) {
            if node.as_element().and_then(|e| e.id()) == Some(target_id) {
                return Some(node_id);
            }
            if let Some(found) = self.find_element_with_id(node_id, target_id) {
                return Some(found);
            }
        }
        None
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
