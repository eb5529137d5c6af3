//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our DOM format.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use lnav_dom::{Document, DomTree, NodeId};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);

        // Find html, head, body elements
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node (and its subtree) under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let id = match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
                return;
            }
            RcNodeData::Doctype { name, .. } => tree.create_doctype(name),
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                // Whitespace between inline elements still separates words,
                // but directly under the skeleton it carries nothing
                if text.trim().is_empty() && !holds_content(tree, parent) {
                    return;
                }
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    if let Err(err) = tree.set_attribute(id, &attr.name.local, &attr.value) {
                        tracing::warn!("Dropping attribute {}: {}", &*attr.name.local, err);
                    }
                }
                id
            }
            RcNodeData::ProcessingInstruction { .. } => return,
        };

        if let Err(err) = tree.append_child(parent, id) {
            tracing::warn!("Dropping parsed node: {}", err);
            return;
        }

        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, id);
        }
    }
}

/// Elements whose whitespace text can end up in rendered text
fn holds_content(tree: &DomTree, parent: NodeId) -> bool {
    tree.tag_name(parent).is_some_and(|tag| tag != "html" && tag != "head")
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html);

        assert!(doc.tree().len() > 1, "Expected more than 1 node, got {}", doc.tree().len());
        assert_eq!(doc.title(), "Test");
    }

    #[test]
    fn test_parse_fragment() {
        let html = "<nav><span>Text</span></nav>";
        let doc = HtmlParser::new().parse(html);

        // Even fragments get wrapped in html/head/body by html5ever
        let body = doc.body().expect("body");
        let first = doc.tree().children(body).next().map(|(id, _)| id).unwrap();
        assert_eq!(doc.tree().tag_name(first), Some("nav"));
    }

    #[test]
    fn test_whitespace_between_inline_elements() {
        let html = "<h2 id=t><span>Site</span> <span>news</span>\n<b>today</b></h2>";
        let doc = HtmlParser::new().parse(html);
        let h2 = doc.get_element_by_id("t").unwrap();

        assert_eq!(doc.tree().inner_text(h2).as_deref(), Some("Site news today"));
    }
}
