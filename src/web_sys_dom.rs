//! A browser [`DomApi`] backed by `web-sys`, feature-gated behind `web`.
//! Every call is a thin pass-through to the corresponding Web API; the
//! reconciler drives it exactly as it drives [`crate::test_dom::TestDom`].

use wasm_bindgen::JsCast;
use web_sys::{Comment, Document, Element, Node, Text};

use crate::dom::DomApi;

/// A `web-sys` backend over a single [`Document`]. Cheap to clone: `Document`
/// is itself a reference-counted JS handle.
#[derive(Clone)]
pub struct WebSysDom {
    document: Document,
}

impl WebSysDom {
    pub fn new(document: Document) -> Self {
        WebSysDom { document }
    }
}

impl DomApi for WebSysDom {
    type Node = Node;

    fn create_element(&self, tag: &str) -> Self::Node {
        self.document
            .create_element(tag)
            .expect("create_element should not fail for a well-formed tag name")
            .unchecked_into()
    }

    fn create_element_ns(&self, ns: &str, tag: &str) -> Self::Node {
        self.document
            .create_element_ns(Some(ns), tag)
            .expect("create_element_ns should not fail for a well-formed tag name")
            .unchecked_into()
    }

    fn create_text_node(&self, text: &str) -> Self::Node {
        let text_node: Text = self.document.create_text_node(text);
        text_node.unchecked_into()
    }

    fn create_comment(&self, text: &str) -> Self::Node {
        let comment: Comment = self.document.create_comment(text);
        comment.unchecked_into()
    }

    fn insert_before(&self, parent: &Self::Node, new: &Self::Node, reference: Option<&Self::Node>) {
        parent
            .insert_before(new, reference)
            .expect("insert_before should not fail for nodes belonging to the same document");
    }

    fn remove_child(&self, parent: &Self::Node, child: &Self::Node) {
        parent
            .remove_child(child)
            .expect("remove_child should not fail for a child actually attached to parent");
    }

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) {
        parent
            .append_child(child)
            .expect("append_child should not fail for nodes belonging to the same document");
    }

    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node> {
        node.parent_node()
    }

    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node> {
        node.next_sibling()
    }

    fn tag_name(&self, element: &Self::Node) -> String {
        element.unchecked_ref::<Element>().tag_name()
    }

    fn set_text_content(&self, node: &Self::Node, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_element_text(&self, node: &Self::Node, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_id(&self, element: &Self::Node, id: &str) {
        element.unchecked_ref::<Element>().set_id(id);
    }

    fn set_class_name(&self, element: &Self::Node, class_name: &str) {
        element.unchecked_ref::<Element>().set_class_name(class_name);
    }

    fn element_id(&self, element: &Self::Node) -> Option<String> {
        let id = element.unchecked_ref::<Element>().id();
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    fn element_class_name(&self, element: &Self::Node) -> Option<String> {
        let class = element.unchecked_ref::<Element>().class_name();
        if class.is_empty() {
            None
        } else {
            Some(class)
        }
    }
}
