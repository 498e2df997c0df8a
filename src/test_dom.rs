//! An in-memory [`DomApi`] fixture (arena-indexed), exposed behind the
//! `test-util` feature so downstream crates can exercise the reconciler
//! without a real host tree, mirroring the teacher's `test_dom` harness.

use std::cell::RefCell;
use std::rc::Rc;

use fxhash::FxHashMap;

use crate::dom::DomApi;
use crate::modules::attrs::AttrsApi;
use crate::modules::class::ClassApi;
use crate::modules::dataset::DatasetApi;
use crate::modules::eventlisteners::{EventListenersApi, Listener};
use crate::modules::props::PropsApi;
use crate::modules::style::StyleApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Element,
    Text,
    Comment,
}

#[derive(Default)]
struct Entry {
    kind: Option<Kind>,
    tag: String,
    ns: Option<String>,
    id: Option<String>,
    class: Option<String>,
    text: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
    attrs: FxHashMap<String, String>,
    toggled_classes: FxHashMap<String, bool>,
    style: FxHashMap<String, String>,
    props: FxHashMap<String, String>,
    dataset: FxHashMap<String, String>,
    listeners: FxHashMap<String, Listener>,
}

/// A host node handle: an index into [`TestDom`]'s arena.
pub type TestNode = usize;

/// An arena-backed in-memory DOM, good enough to drive and assert against
/// full `patch()` cycles in tests. Cheaply `Clone` (an `Rc` handle to shared
/// storage) so a delayed `remove` callback (§4.5) can hold its own handle
/// long after the `patch()` call that created it has returned.
#[derive(Default, Clone)]
pub struct TestDom {
    nodes: Rc<RefCell<Vec<Entry>>>,
}

impl TestDom {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: Entry) -> TestNode {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(entry);
        nodes.len() - 1
    }

    pub fn tag_name_of(&self, node: &TestNode) -> String {
        self.nodes.borrow()[*node].tag.clone()
    }

    pub fn ns_of(&self, node: &TestNode) -> Option<String> {
        self.nodes.borrow()[*node].ns.clone()
    }

    pub fn id_of(&self, node: &TestNode) -> Option<String> {
        self.nodes.borrow()[*node].id.clone()
    }

    pub fn class_of(&self, node: &TestNode) -> Option<String> {
        self.nodes.borrow()[*node].class.clone()
    }

    pub fn text_of(&self, node: &TestNode) -> Option<String> {
        self.nodes.borrow()[*node].text.clone()
    }

    pub fn children_of(&self, node: &TestNode) -> Vec<TestNode> {
        self.nodes.borrow()[*node].children.clone()
    }

    pub fn child_tags(&self, node: &TestNode) -> Vec<String> {
        self.children_of(node)
            .iter()
            .map(|c| self.tag_name_of(c))
            .collect()
    }

    pub fn attribute(&self, node: &TestNode, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].attrs.get(name).cloned()
    }

    pub fn has_class(&self, node: &TestNode, name: &str) -> bool {
        self.nodes.borrow()[*node]
            .toggled_classes
            .get(name)
            .copied()
            .unwrap_or(false)
    }

    pub fn style_property(&self, node: &TestNode, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].style.get(name).cloned()
    }

    pub fn property(&self, node: &TestNode, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].props.get(name).cloned()
    }

    pub fn data_attribute(&self, node: &TestNode, name: &str) -> Option<String> {
        self.nodes.borrow()[*node].dataset.get(name).cloned()
    }

    /// Simulate the host dispatching `event` on `node`, invoking whatever
    /// listener is currently registered for it (test-only; no real DOM event
    /// object exists).
    pub fn fire(&self, node: &TestNode, event: &str) {
        let listener = self.nodes.borrow()[*node].listeners.get(event).cloned();
        if let Some(listener) = listener {
            listener();
        }
    }
}

impl DomApi for TestDom {
    type Node = TestNode;

    fn create_element(&self, tag: &str) -> Self::Node {
        self.push(Entry {
            kind: Some(Kind::Element),
            tag: tag.to_owned(),
            ..Entry::default()
        })
    }

    fn create_element_ns(&self, ns: &str, tag: &str) -> Self::Node {
        self.push(Entry {
            kind: Some(Kind::Element),
            tag: tag.to_owned(),
            ns: Some(ns.to_owned()),
            ..Entry::default()
        })
    }

    fn create_text_node(&self, text: &str) -> Self::Node {
        self.push(Entry {
            kind: Some(Kind::Text),
            text: Some(text.to_owned()),
            ..Entry::default()
        })
    }

    fn create_comment(&self, text: &str) -> Self::Node {
        self.push(Entry {
            kind: Some(Kind::Comment),
            text: Some(text.to_owned()),
            ..Entry::default()
        })
    }

    fn insert_before(&self, parent: &Self::Node, new: &Self::Node, reference: Option<&Self::Node>) {
        self.remove_from_current_parent(new);
        let mut nodes = self.nodes.borrow_mut();
        let idx = match reference {
            Some(r) => nodes[*parent]
                .children
                .iter()
                .position(|c| c == r)
                .unwrap_or(nodes[*parent].children.len()),
            None => nodes[*parent].children.len(),
        };
        nodes[*parent].children.insert(idx, *new);
        nodes[*new].parent = Some(*parent);
    }

    fn remove_child(&self, parent: &Self::Node, child: &Self::Node) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[*parent].children.retain(|c| c != child);
        nodes[*child].parent = None;
    }

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) {
        self.remove_from_current_parent(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[*parent].children.push(*child);
        nodes[*child].parent = Some(*parent);
    }

    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node> {
        self.nodes.borrow()[*node].parent
    }

    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node> {
        let nodes = self.nodes.borrow();
        let parent = nodes[*node].parent?;
        let siblings = &nodes[parent].children;
        let idx = siblings.iter().position(|c| c == node)?;
        siblings.get(idx + 1).copied()
    }

    fn tag_name(&self, element: &Self::Node) -> String {
        self.tag_name_of(element)
    }

    fn set_text_content(&self, node: &Self::Node, text: &str) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[*node].children.clear();
        nodes[*node].text = Some(text.to_owned());
    }

    fn set_element_text(&self, node: &Self::Node, text: &str) {
        self.nodes.borrow_mut()[*node].text = Some(text.to_owned());
    }

    fn set_id(&self, element: &Self::Node, id: &str) {
        self.nodes.borrow_mut()[*element].id = Some(id.to_owned());
    }

    fn set_class_name(&self, element: &Self::Node, class_name: &str) {
        self.nodes.borrow_mut()[*element].class = Some(class_name.to_owned());
    }

    fn element_id(&self, element: &Self::Node) -> Option<String> {
        self.id_of(element)
    }

    fn element_class_name(&self, element: &Self::Node) -> Option<String> {
        self.class_of(element)
    }
}

impl TestDom {
    fn remove_from_current_parent(&self, node: &TestNode) {
        let parent = self.nodes.borrow()[*node].parent;
        if let Some(parent) = parent {
            self.nodes.borrow_mut()[parent].children.retain(|c| c != node);
        }
    }
}

impl AttrsApi for TestDom {
    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str) {
        self.nodes.borrow_mut()[*element]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_attribute(&self, element: &Self::Node, name: &str) {
        self.nodes.borrow_mut()[*element].attrs.remove(name);
    }
}

impl ClassApi for TestDom {
    fn toggle_class(&self, element: &Self::Node, name: &str, on: bool) {
        self.nodes.borrow_mut()[*element]
            .toggled_classes
            .insert(name.to_owned(), on);
    }
}

impl StyleApi for TestDom {
    fn set_style_property(&self, element: &Self::Node, name: &str, value: &str) {
        self.nodes.borrow_mut()[*element]
            .style
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_style_property(&self, element: &Self::Node, name: &str) {
        self.nodes.borrow_mut()[*element].style.remove(name);
    }
}

impl PropsApi for TestDom {
    fn set_property(&self, element: &Self::Node, name: &str, value: &str) {
        self.nodes.borrow_mut()[*element]
            .props
            .insert(name.to_owned(), value.to_owned());
    }
}

impl DatasetApi for TestDom {
    fn set_data_attribute(&self, element: &Self::Node, name: &str, value: &str) {
        self.nodes.borrow_mut()[*element]
            .dataset
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_data_attribute(&self, element: &Self::Node, name: &str) {
        self.nodes.borrow_mut()[*element].dataset.remove(name);
    }
}

impl EventListenersApi for TestDom {
    fn add_event_listener(&self, element: &Self::Node, event: &str, listener: Listener) {
        self.nodes.borrow_mut()[*element]
            .listeners
            .insert(event.to_owned(), listener);
    }

    fn remove_event_listener(&self, element: &Self::Node, event: &str) {
        self.nodes.borrow_mut()[*element].listeners.remove(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_before_reorders_and_detaches() {
        let dom = TestDom::new();
        let parent = dom.create_element("ul");
        let a = dom.create_element("li");
        let b = dom.create_element("li");
        dom.append_child(&parent, &a);
        dom.append_child(&parent, &b);
        dom.insert_before(&parent, &b, Some(&a));
        assert_eq!(dom.children_of(&parent), vec![b, a]);
    }

    #[test]
    fn next_sibling_walks_in_order() {
        let dom = TestDom::new();
        let parent = dom.create_element("ul");
        let a = dom.create_element("li");
        let b = dom.create_element("li");
        dom.append_child(&parent, &a);
        dom.append_child(&parent, &b);
        assert_eq!(dom.next_sibling(&a), Some(b));
        assert_eq!(dom.next_sibling(&b), None);
    }
}
