//! ARIA Roles
//!
//! Role parsing, the implicit tag→role table, and effective role resolution.

use lnav_dom::{DomTree, NodeId};
use std::fmt;

/// ARIA role
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,
    Application,

    // Widget roles
    Button,
    Checkbox,
    Dialog,
    Link,
    Menu,
    MenuItem,
    Tab,
    TabPanel,
    TextBox,

    // Document structure
    Article,
    Document,
    Group,
    Heading,
    Img,
    List,
    ListItem,
    Presentation,
    Table,

    /// Any other explicit value, kept verbatim (lower-cased)
    Custom(String),
}

impl AriaRole {
    /// Parse a role attribute value. Only the first token of a fallback list
    /// (`role="region navigation"`) is considered; empty values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let token = s.split_whitespace().next()?.to_ascii_lowercase();
        Some(match token.as_str() {
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,
            "application" => Self::Application,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "dialog" => Self::Dialog,
            "link" => Self::Link,
            "menu" => Self::Menu,
            "menuitem" => Self::MenuItem,
            "tab" => Self::Tab,
            "tabpanel" => Self::TabPanel,
            "textbox" => Self::TextBox,
            "article" => Self::Article,
            "document" => Self::Document,
            "group" => Self::Group,
            "heading" => Self::Heading,
            "img" => Self::Img,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "none" | "presentation" => Self::Presentation,
            "table" => Self::Table,
            _ => Self::Custom(token),
        })
    }

    /// Role name as it appears in markup
    pub fn as_str(&self) -> &str {
        match self {
            Self::Banner => "banner",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Form => "form",
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Region => "region",
            Self::Search => "search",
            Self::Application => "application",
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::Dialog => "dialog",
            Self::Link => "link",
            Self::Menu => "menu",
            Self::MenuItem => "menuitem",
            Self::Tab => "tab",
            Self::TabPanel => "tabpanel",
            Self::TextBox => "textbox",
            Self::Article => "article",
            Self::Document => "document",
            Self::Group => "group",
            Self::Heading => "heading",
            Self::Img => "img",
            Self::List => "list",
            Self::ListItem => "listitem",
            Self::Presentation => "presentation",
            Self::Table => "table",
            Self::Custom(name) => name,
        }
    }

    /// Roles that are landmarks unconditionally
    pub fn is_landmark(&self) -> bool {
        matches!(
            self,
            Self::Banner
                | Self::Complementary
                | Self::ContentInfo
                | Self::Main
                | Self::Navigation
                | Self::Search
        )
    }

    /// Roles that only count as landmarks when they carry a label
    pub fn requires_label(&self) -> bool {
        matches!(self, Self::Region | Self::Application | Self::Form)
    }
}

impl fmt::Display for AriaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sectioning elements carrying an implicit landmark role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkTag {
    Header,
    Footer,
    Main,
    Aside,
    Nav,
}

impl LandmarkTag {
    /// Look up a (lower-case) tag name; `None` for tags without an implicit landmark role
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "header" => Some(Self::Header),
            "footer" => Some(Self::Footer),
            "main" => Some(Self::Main),
            "aside" => Some(Self::Aside),
            "nav" => Some(Self::Nav),
            _ => None,
        }
    }

    pub fn implicit_role(self) -> AriaRole {
        match self {
            Self::Header => AriaRole::Banner,
            Self::Footer => AriaRole::ContentInfo,
            Self::Main => AriaRole::Main,
            Self::Aside => AriaRole::Complementary,
            Self::Nav => AriaRole::Navigation,
        }
    }

    /// banner/contentinfo only apply outside a sectioning container
    fn scoped_to_page(self) -> bool {
        matches!(self, Self::Header | Self::Footer)
    }
}

/// Containers that demote a directly nested header/footer
const SECTIONING_CONTAINERS: &[&str] = &["section", "article"];

/// Effective role of a node: an explicit `role` attribute wins, otherwise the
/// implicit role of its tag, with header/footer suppressed when the immediate
/// parent is a `section` or `article`.
pub fn resolve_role(tree: &DomTree, node: NodeId) -> Option<AriaRole> {
    let elem = tree.element(node)?;

    if let Some(explicit) = elem.get_attr("role").and_then(AriaRole::parse) {
        return Some(explicit);
    }

    let tag = LandmarkTag::from_tag(elem.tag_name())?;
    if tag.scoped_to_page() {
        let parent_tag = tree.parent(node).and_then(|p| tree.tag_name(p));
        if parent_tag.is_some_and(|t| SECTIONING_CONTAINERS.contains(&t)) {
            tracing::trace!("{} {:?} suppressed inside {:?}", node, tag, parent_tag);
            return None;
        }
    }
    Some(tag.implicit_role())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(parent_tag: &str, child_tag: &str) -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let parent = tree.create_element(parent_tag);
        let child = tree.create_element(child_tag);
        tree.append_child(tree.root(), parent).unwrap();
        tree.append_child(parent, child).unwrap();
        (tree, child)
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(AriaRole::parse("navigation"), Some(AriaRole::Navigation));
        assert_eq!(AriaRole::parse(" Main "), Some(AriaRole::Main));
        assert_eq!(AriaRole::parse("region navigation"), Some(AriaRole::Region));
        assert_eq!(AriaRole::parse("   "), None);
        assert_eq!(
            AriaRole::parse("doc-toc"),
            Some(AriaRole::Custom("doc-toc".into()))
        );
        assert!(AriaRole::Navigation.is_landmark());
        assert!(!AriaRole::Region.is_landmark());
        assert!(AriaRole::Region.requires_label());
    }

    #[test]
    fn test_implicit_roles() {
        assert_eq!(LandmarkTag::from_tag("nav").map(LandmarkTag::implicit_role), Some(AriaRole::Navigation));
        assert_eq!(LandmarkTag::from_tag("footer").map(LandmarkTag::implicit_role), Some(AriaRole::ContentInfo));
        assert_eq!(LandmarkTag::from_tag("div"), None);
    }

    #[test]
    fn test_header_in_section_suppressed() {
        let (tree, header) = tree_with("section", "header");
        assert_eq!(resolve_role(&tree, header), None);

        let (tree, header) = tree_with("body", "header");
        assert_eq!(resolve_role(&tree, header), Some(AriaRole::Banner));
    }

    #[test]
    fn test_only_immediate_parent_suppresses() {
        let mut tree = DomTree::new();
        let article = tree.create_element("article");
        let div = tree.create_element("div");
        let footer = tree.create_element("footer");
        tree.append_child(tree.root(), article).unwrap();
        tree.append_child(article, div).unwrap();
        tree.append_child(div, footer).unwrap();

        assert_eq!(resolve_role(&tree, footer), Some(AriaRole::ContentInfo));
    }

    #[test]
    fn test_explicit_role_overrides() {
        let (mut tree, header) = tree_with("section", "header");
        tree.set_attribute(header, "role", "banner").unwrap();
        assert_eq!(resolve_role(&tree, header), Some(AriaRole::Banner));

        let (mut tree, nav) = tree_with("body", "nav");
        tree.set_attribute(nav, "role", "presentation").unwrap();
        assert_eq!(resolve_role(&tree, nav), Some(AriaRole::Presentation));
    }

    #[test]
    fn test_empty_role_attribute_ignored() {
        let (mut tree, main) = tree_with("body", "main");
        tree.set_attribute(main, "role", "").unwrap();
        assert_eq!(resolve_role(&tree, main), Some(AriaRole::Main));
    }
}
