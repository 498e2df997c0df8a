//! The top-level patch entry (§4.6): module `pre`/`post` bracketing, the
//! same-vnode-or-replace decision, and the insertion-queue flush.

use crate::create::{create_elm, InsertionQueue};
use crate::dom::DomApi;
use crate::module::{ModuleHooks, ModuleRegistry};
use crate::node::{same_vnode, VNode};
use crate::patch::patch_vnode;
use crate::remove::remove_vnodes;

/// What a `patch()` call reconciles against: either a previous virtual tree,
/// or — on the very first call for a given host subtree — a bare live
/// element to be adopted and replaced.
pub enum PatchTarget<N> {
    Vnode(VNode<N>),
    Element(N),
}

impl<N> From<VNode<N>> for PatchTarget<N> {
    fn from(v: VNode<N>) -> Self {
        PatchTarget::Vnode(v)
    }
}

/// A configured reconciler: a backend plus its module stack, built once via
/// [`init`] and reused across every subsequent `patch()` call.
pub struct Patcher<D: DomApi> {
    dom: D,
    modules: ModuleRegistry<D::Node>,
}

/// Construct a [`Patcher`] from a backend and its module stack, in
/// registration order (§2 "init").
pub fn init<D: DomApi>(dom: D, modules: Vec<ModuleHooks<D::Node>>) -> Patcher<D> {
    Patcher {
        dom,
        modules: ModuleRegistry::new(modules),
    }
}

impl<D: DomApi + Clone + 'static> Patcher<D> {
    /// Reconcile `vnode` against `old`, returning the tree that now owns the
    /// live `elm` backreferences. `old` is either a previous `patch()`
    /// result or a bare host element being adopted for the first time.
    pub fn patch(&self, old: impl Into<PatchTarget<D::Node>>, mut vnode: VNode<D::Node>) -> VNode<D::Node> {
        self.modules.run_pre();

        let mut old_vnode = match old.into() {
            PatchTarget::Element(elm) => empty_node_at(&self.dom, elm),
            PatchTarget::Vnode(v) => v,
        };

        let mut queue: InsertionQueue<D::Node> = InsertionQueue::new();
        let replacing_root = !same_vnode(&old_vnode, &vnode);
        log::debug!(
            "patch: {:?} -> {:?} (root {})",
            old_vnode.sel,
            vnode.sel,
            if replacing_root { "replaced" } else { "reused" }
        );

        if !replacing_root {
            patch_vnode(&self.dom, &self.modules, &mut old_vnode, &mut vnode, &mut queue);
        } else {
            let old_elm = old_vnode
                .elm
                .clone()
                .expect("the previous patch target must already have a live element");
            let parent = self.dom.parent_node(&old_elm);

            let new_elm = create_elm(&self.dom, &self.modules, &mut vnode, &mut queue);

            if let Some(parent) = parent {
                let next = self.dom.next_sibling(&old_elm);
                self.dom.insert_before(&parent, &new_elm, next.as_ref());
                remove_vnodes(&self.dom, &self.modules, &parent, std::slice::from_ref(&old_vnode));
            }
        }

        for (insert, elm) in queue {
            insert(&elm);
        }

        self.modules.run_post();
        vnode
    }
}

/// Adopt a live, unmanaged host element by describing it as a VNode whose
/// selector is derived from its tag, id, and class — the same pseudo-vnode
/// real DOM-diffing libraries synthesize for a first-ever patch.
fn empty_node_at<D: DomApi>(dom: &D, elm: D::Node) -> VNode<D::Node> {
    let mut sel = dom.tag_name(&elm).to_lowercase();
    if let Some(id) = dom.element_id(&elm) {
        sel.push('#');
        sel.push_str(&id);
    }
    if let Some(class) = dom.element_class_name(&elm) {
        for token in class.split_whitespace() {
            sel.push('.');
            sel.push_str(token);
        }
    }
    let mut vnode = VNode::new(Some(sel), None, None, None, None);
    vnode.elm = Some(elm);
    vnode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperscript::{children, h, keyed};
    use crate::test_dom::TestDom;

    #[test]
    fn first_patch_adopts_bare_element() {
        let dom = TestDom::new();
        let container = dom.create_element("div");
        let patcher = init(dom.clone(), Vec::new());

        let vnode: VNode<usize> = h("div", children([h::<usize>("span", "hi")]));
        let result = patcher.patch(PatchTarget::Element(container), vnode);

        let elm = result.elm.unwrap();
        assert_eq!(dom.child_tags(&elm), vec!["span"]);
    }

    #[test]
    fn replaces_root_when_selector_changes() {
        let dom = TestDom::new();
        let container = dom.create_element("section");
        dom.set_id(&container, "root");
        let body = dom.create_element("body");
        dom.append_child(&body, &container);

        let patcher = init(dom.clone(), Vec::new());
        let first = patcher.patch(PatchTarget::Element(container), h::<usize>("section#root", ()));
        let second = patcher.patch(first, h::<usize>("article#root", "replaced"));

        let elm = second.elm.unwrap();
        assert_eq!(dom.tag_name(&elm), "article");
        assert_eq!(dom.children_of(&body), vec![elm]);
    }

    #[test]
    fn second_patch_reuses_matching_root() {
        let dom = TestDom::new();
        let container = dom.create_element("ul");
        let patcher = init(dom.clone(), Vec::new());

        let first = patcher.patch(
            PatchTarget::Element(container),
            h::<usize>(
                "ul",
                children([keyed(h::<usize>("li", "a"), "a"), keyed(h::<usize>("li", "b"), "b")]),
            ),
        );
        let second = patcher.patch(
            first,
            h::<usize>(
                "ul",
                children([keyed(h::<usize>("li", "b"), "b"), keyed(h::<usize>("li", "a"), "a")]),
            ),
        );

        let elm = second.elm.unwrap();
        let order: Vec<String> = dom
            .children_of(&elm)
            .iter()
            .map(|c| dom.text_of(c).unwrap())
            .collect();
        assert_eq!(order, vec!["b", "a"]);
    }
}
