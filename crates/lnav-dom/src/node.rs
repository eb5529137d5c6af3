//! DOM Node
//!
//! Nodes link to each other through [`NodeId`]s rather than pointers, so the
//! whole tree lives in one `Vec` and references stay `Copy`.

use crate::{InlineStyle, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a doctype node
    pub fn doctype(name: impl Into<String>) -> Self {
        Self::with_data(NodeData::Doctype { name: name.into() })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lower-case tag name
    pub tag: String,
    attrs: NamedNodeMap,
    style: InlineStyle,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            style: InlineStyle::new(),
        }
    }

    /// Tag name
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains(name)
    }

    /// Set an attribute. Setting `style` reparses the inline style.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case("style") {
            self.style = InlineStyle::parse(value);
        }
        self.attrs.set(name, value);
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        if name.eq_ignore_ascii_case("style") {
            self.style = InlineStyle::new();
        }
        self.attrs.remove(name).map(|a| a.value)
    }

    pub fn attrs(&self) -> &NamedNodeMap {
        &self.attrs
    }

    /// Cached id attribute
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    pub fn style(&self) -> &InlineStyle {
        &self.style
    }

    /// Mutate the inline style, keeping the `style` attribute in sync
    pub fn update_style<R>(&mut self, f: impl FnOnce(&mut InlineStyle) -> R) -> R {
        let result = f(&mut self.style);
        if self.style.is_empty() {
            self.attrs.remove("style");
        } else {
            let text = self.style.css_text();
            self.attrs.set("style", &text);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_lowercased() {
        let node = Node::element("NAV");
        assert_eq!(node.as_element().map(|e| e.tag_name()), Some("nav"));
    }

    #[test]
    fn test_style_attribute_sync() {
        let mut elem = ElementData::new("main");
        elem.set_attr("style", "color: red");
        elem.update_style(|s| s.set_property("outline", "medium solid red"));
        assert_eq!(
            elem.get_attr("style"),
            Some("color: red; outline: medium solid red;")
        );

        elem.update_style(|s| {
            s.remove_property("outline");
            s.remove_property("color");
        });
        assert!(!elem.has_attr("style"));
    }
}
