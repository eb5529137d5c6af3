//! lnav DOM - Document Object Model
//!
//! Arena-based document tree hosting the pages the landmark navigator
//! walks. Nodes are addressed by [`NodeId`] and never freed while the
//! tree lives; detaching only unlinks a subtree.

mod attributes;
mod document;
mod node;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::Document;
pub use node::{ElementData, Node, NodeData};
pub use style::InlineStyle;
pub use tree::{Ancestors, Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the NONE sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0} does not exist")]
    InvalidNode(NodeId),

    #[error("Cannot insert {child} under {parent}: would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),
}
