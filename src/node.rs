//! The VNode model (§3): an immutable-by-convention description of one node
//! in a virtual tree, and the identity rule ([`same_vnode`]) the reconciler
//! uses to decide whether two VNodes describe the same element.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use fxhash::FxHashMap;

/// An application-supplied identity token, stabilizing a child's match across
/// re-renders within a sibling list (§3 "Key").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Int(i64),
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}
impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}
impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

/// A callback handed to a `remove` hook. It must be invoked exactly once,
/// possibly asynchronously (e.g. after a CSS transition completes), at which
/// point the engine's bookkeeping considers that hook's obligation discharged
/// (§4.5).
pub type RemoveCallback = Rc<dyn Fn()>;

pub type InitHook<N> = Rc<dyn Fn(&mut VNode<N>)>;
pub type NodeCreateHook<N> = Rc<dyn Fn(&VNode<N>, &VNode<N>)>;
/// Fired after a newly-created node's host element (and every ancestor up to
/// the tree root) is attached. Takes the host handle rather than the full
/// VNode: an insert hook only ever needs to act on the live node (measure it,
/// animate it, focus it), and a host handle is all the top-level patch entry
/// can cheaply hand over once the insertion queue is flushed after the
/// subtree that produced it has already been consumed (see DESIGN.md).
pub type InsertHook<N> = Rc<dyn Fn(&N)>;
pub type PrePatchHook<N> = Rc<dyn Fn(&VNode<N>, &VNode<N>)>;
pub type NodeUpdateHook<N> = Rc<dyn Fn(&VNode<N>, &VNode<N>)>;
pub type PostPatchHook<N> = Rc<dyn Fn(&VNode<N>, &VNode<N>)>;
pub type NodeDestroyHook<N> = Rc<dyn Fn(&VNode<N>)>;
pub type NodeRemoveHook<N> = Rc<dyn Fn(&VNode<N>, RemoveCallback)>;

/// Per-node lifecycle hooks, read from `VNode::data.hook` (§6).
#[derive(Clone, Default)]
pub struct NodeHooks<N> {
    pub init: Option<InitHook<N>>,
    pub create: Option<NodeCreateHook<N>>,
    pub insert: Option<InsertHook<N>>,
    pub prepatch: Option<PrePatchHook<N>>,
    pub update: Option<NodeUpdateHook<N>>,
    pub postpatch: Option<PostPatchHook<N>>,
    pub destroy: Option<NodeDestroyHook<N>>,
    pub remove: Option<NodeRemoveHook<N>>,
}

impl<N> fmt::Debug for NodeHooks<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHooks")
            .field("init", &self.init.is_some())
            .field("create", &self.create.is_some())
            .field("insert", &self.insert.is_some())
            .field("prepatch", &self.prepatch.is_some())
            .field("update", &self.update.is_some())
            .field("postpatch", &self.postpatch.is_some())
            .field("destroy", &self.destroy.is_some())
            .field("remove", &self.remove.is_some())
            .finish()
    }
}

/// Per-node metadata bucket (§3 "VNodeData"). The core only ever reads `ns`
/// and `hook`; everything else is an open extension map modules read and
/// write under their own string key, per the design note in §9 ("Open bucket
/// `data`... a struct of known module data plus an extension map").
#[derive(Default)]
pub struct VNodeData<N> {
    /// Namespace URI new elements created under this node should use, e.g.
    /// [`crate::selector::SVG_NS`].
    pub ns: Option<String>,
    pub hook: NodeHooks<N>,
    /// Module-private payloads, keyed by the owning module's name.
    pub extra: FxHashMap<&'static str, Box<dyn Any>>,
}

impl<N> fmt::Debug for VNodeData<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNodeData")
            .field("ns", &self.ns)
            .field("hook", &self.hook)
            .field("extra_keys", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<N> VNodeData<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ns(ns: impl Into<String>) -> Self {
        Self {
            ns: Some(ns.into()),
            ..Self::default()
        }
    }
}

/// An immutable-by-convention description of one node in a virtual tree
/// (§3). `elm` is populated by the engine during materialization and is
/// never assigned by application code.
#[derive(Debug, Default)]
pub struct VNode<N> {
    /// Selector: tag plus optional `#id`/`.class` segments. `"!"` denotes a
    /// comment; absent denotes a pure text node; `""` is reserved for the
    /// wrapped-root pseudo-VNode produced by the top-level patch entry.
    pub sel: Option<String>,
    pub data: Option<VNodeData<N>>,
    pub children: Option<Vec<VNode<N>>>,
    pub text: Option<String>,
    /// Backreference to the live host node. Absent until materialized by
    /// `create_elm`; owned by the engine thereafter.
    pub elm: Option<N>,
    pub key: Option<Key>,
}

impl<N> VNode<N> {
    /// The canonical VNode factory (§2): packages every field into a VNode.
    pub fn new(
        sel: Option<String>,
        data: Option<VNodeData<N>>,
        children: Option<Vec<VNode<N>>>,
        text: Option<String>,
        key: Option<Key>,
    ) -> Self {
        VNode {
            sel,
            data,
            children,
            text,
            elm: None,
            key,
        }
    }

    /// A pure text node: no selector, no data, no children.
    pub fn text(text: impl Into<String>) -> Self {
        VNode {
            sel: None,
            data: None,
            children: None,
            text: Some(text.into()),
            elm: None,
            key: None,
        }
    }

    /// A comment node (`sel == "!"`).
    pub fn comment(text: impl Into<String>) -> Self {
        VNode {
            sel: Some("!".to_owned()),
            data: None,
            children: None,
            text: Some(text.into()),
            elm: None,
            key: None,
        }
    }

    /// The shared sentinel passed as `emptyNode` to module/per-node `create`
    /// hooks (§4.2 step 5): empty selector, no data.
    pub fn empty() -> Self {
        VNode {
            sel: Some(String::new()),
            data: None,
            children: None,
            text: None,
            elm: None,
            key: None,
        }
    }

    pub fn is_comment(&self) -> bool {
        self.sel.as_deref() == Some("!")
    }

    /// The namespace URI recorded in `data.ns`, if any.
    pub fn ns(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.ns.as_deref())
    }
}

/// Two VNodes describe the same element when both `key` and `sel` are equal.
/// Absent keys on both sides compare equal to each other, so unkeyed
/// siblings match positionally (§3 "Identity and equality").
pub fn same_vnode<N>(a: &VNode<N>, b: &VNode<N>) -> bool {
    a.key == b.key && a.sel == b.sel
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(sel: &str, key: Option<&str>) -> VNode<()> {
        VNode::new(
            Some(sel.to_owned()),
            None,
            None,
            None,
            key.map(Key::from),
        )
    }

    #[test]
    fn same_sel_and_key_matches() {
        assert!(same_vnode(&leaf("div", Some("a")), &leaf("div", Some("a"))));
    }

    #[test]
    fn different_key_does_not_match() {
        assert!(!same_vnode(&leaf("div", Some("a")), &leaf("div", Some("b"))));
    }

    #[test]
    fn different_sel_does_not_match() {
        assert!(!same_vnode(&leaf("div", None), &leaf("span", None)));
    }

    #[test]
    fn unkeyed_siblings_match_positionally() {
        assert!(same_vnode(&leaf("li", None), &leaf("li", None)));
    }

    #[test]
    fn text_nodes_have_no_selector() {
        let a = VNode::<()>::text("hi");
        let b = VNode::<()>::text("there");
        assert!(same_vnode(&a, &b));
    }
}
