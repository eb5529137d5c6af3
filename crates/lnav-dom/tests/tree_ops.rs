//! Tree mutation tests across nodes of a small page

use lnav_dom::{Document, DomError, NodeId};

fn page() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new("https://example.test/");
    let body = doc.body().unwrap();
    let tree = doc.tree_mut();

    let header = tree.create_element("header");
    let main = tree.create_element("main");
    let h1 = tree.create_element("h1");
    let title = tree.create_text("  Welcome\n home ");
    tree.append_child(body, header).unwrap();
    tree.append_child(body, main).unwrap();
    tree.append_child(main, h1).unwrap();
    tree.append_child(h1, title).unwrap();
    tree.set_attribute(h1, "id", "page-title").unwrap();

    (doc, header, main, h1)
}

#[test]
fn test_move_between_parents() {
    let (mut doc, header, main, h1) = page();
    doc.tree_mut().append_child(header, h1).unwrap();

    assert_eq!(doc.tree().parent(h1), Some(header));
    assert_eq!(doc.tree().children(main).count(), 0);
    assert_eq!(doc.get_element_by_id("page-title"), Some(h1));
}

#[test]
fn test_text_projections() {
    let (doc, _, main, _) = page();
    assert_eq!(doc.tree().text_content(main), "  Welcome\n home ");
    assert_eq!(doc.tree().inner_text(main).as_deref(), Some("Welcome home"));
}

#[test]
fn test_detached_nodes_not_found_by_id() {
    let (mut doc, _, main, _) = page();
    doc.tree_mut().detach(main);
    assert_eq!(doc.get_element_by_id("page-title"), None);
}

#[test]
fn test_attribute_on_text_node_fails() {
    let (mut doc, _, _, h1) = page();
    let text = doc.tree().children(h1).next().map(|(id, _)| id).unwrap();
    assert_eq!(
        doc.tree_mut().set_attribute(text, "role", "main"),
        Err(DomError::NotAnElement(text))
    );
}

#[test]
fn test_outline_style_roundtrip() {
    let (mut doc, header, _, _) = page();
    let tree = doc.tree_mut();
    tree.update_style(header, |s| s.set_property("outline", "medium solid red"))
        .unwrap();
    assert_eq!(tree.style_property(header, "outline"), Some("medium solid red"));

    tree.update_style(header, |s| s.remove_property("outline")).unwrap();
    assert_eq!(tree.style_property(header, "outline"), None);
    assert!(!tree.has_attribute(header, "style"));
}
