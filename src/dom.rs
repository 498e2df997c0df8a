//! The DOM adapter interface (§2, §6): the minimal capability set over a
//! host document tree the core depends on. The core assumes nothing else —
//! no attribute methods, no event wiring, no styling. Those belong to
//! modules, which talk to the host node handle directly.

/// A capability set over the host tree. Implement this once per backend
/// (browser DOM via `web-sys`, a server-side string builder, a native
/// renderer, an in-memory test fixture) and the reconciliation core works
/// against it unchanged.
pub trait DomApi {
    /// A cheap, cloneable handle to a live host node.
    type Node: Clone;

    fn create_element(&self, tag: &str) -> Self::Node;
    fn create_element_ns(&self, ns: &str, tag: &str) -> Self::Node;
    fn create_text_node(&self, text: &str) -> Self::Node;
    fn create_comment(&self, text: &str) -> Self::Node;

    /// Insert `new` before `reference` under `parent`, or append it when
    /// `reference` is `None`.
    fn insert_before(&self, parent: &Self::Node, new: &Self::Node, reference: Option<&Self::Node>);
    fn remove_child(&self, parent: &Self::Node, child: &Self::Node);
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;
    fn tag_name(&self, element: &Self::Node) -> String;

    /// Set a node's entire text content, used when clearing old children or
    /// old text ahead of installing new content (§4.3 step 5).
    fn set_text_content(&self, node: &Self::Node, text: &str);
    /// Set the text content of an element specifically, used by `create_elm`
    /// when a VNode is a leaf with `text` and no `children` (§4.2 step 6).
    fn set_element_text(&self, node: &Self::Node, text: &str);

    /// Set the element's `id`. Spec §4.2 step 4 requires `create_elm` to set
    /// the id/class baked into the selector directly (the way a real DOM
    /// element's `.id`/`.className` properties are assigned rather than
    /// going through a module's `setAttribute` call); these two narrowly
    /// scoped capabilities cover that without widening the adapter into a
    /// general attribute-setting interface, which modules own instead.
    fn set_id(&self, element: &Self::Node, id: &str);
    /// Set the element's `class` attribute to a space-joined token list.
    fn set_class_name(&self, element: &Self::Node, class_name: &str);

    /// Read an element's `id`, used when the top-level patch entry wraps a
    /// bare host element into a pseudo-VNode ahead of its first patch.
    fn element_id(&self, element: &Self::Node) -> Option<String>;
    /// Read an element's `class` attribute, space-joined.
    fn element_class_name(&self, element: &Self::Node) -> Option<String>;
}
