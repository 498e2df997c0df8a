//! The element materializer (§4.2): turns a VNode into a live host node,
//! recursively, emitting create-phase hooks.

use smallvec::SmallVec;

use crate::dom::DomApi;
use crate::module::ModuleRegistry;
use crate::node::{InsertHook, VNode};
use crate::selector::parse_selector;

/// Newly-materialized nodes with an `insert` hook, recorded in post-order so
/// children fire before their parents once the top-level patch entry flushes
/// them (§4.6 step 5). Most patch cycles queue only a handful of these, so
/// they live inline rather than behind a heap allocation.
pub type InsertionQueue<N> = SmallVec<[(InsertHook<N>, N); 8]>;

/// Materialize `vnode`, recording `vnode.elm`, and push any `insert` hook
/// onto `queue` for the caller to flush later.
pub fn create_elm<D: DomApi>(
    dom: &D,
    modules: &ModuleRegistry<D::Node>,
    vnode: &mut VNode<D::Node>,
    queue: &mut InsertionQueue<D::Node>,
) -> D::Node {
    // Step 1: `init` may replace `data` wholesale, so re-read afterwards.
    if let Some(init) = vnode.data.as_ref().and_then(|d| d.hook.init.clone()) {
        init(vnode);
    }

    let elm = if vnode.is_comment() {
        // Step 2: comment node.
        dom.create_comment(vnode.text.as_deref().unwrap_or(""))
    } else if vnode.sel.is_none() {
        // Step 3: pure text node.
        dom.create_text_node(vnode.text.as_deref().unwrap_or(""))
    } else {
        // Step 4: element, parsed from the selector.
        let sel = vnode.sel.clone().unwrap_or_default();
        let parsed = parse_selector(&sel);
        let ns = vnode.data.as_ref().and_then(|d| d.ns.clone());
        let elm = match ns {
            Some(ns) => dom.create_element_ns(&ns, parsed.tag),
            None => dom.create_element(parsed.tag),
        };
        if let Some(id) = parsed.id {
            dom.set_id(&elm, id);
        }
        if !parsed.classes.is_empty() {
            dom.set_class_name(&elm, &parsed.classes.join(" "));
        }

        // Step 5: module `create` hooks see the live-but-still-empty element.
        let empty = VNode::empty();
        modules.run_create(&empty, vnode);

        // Step 6: children take precedence over text.
        if let Some(children) = vnode.children.as_mut() {
            for child in children.iter_mut() {
                let child_elm = create_elm(dom, modules, child, queue);
                dom.append_child(&elm, &child_elm);
            }
        } else if let Some(text) = vnode.text.as_deref() {
            if !text.is_empty() {
                dom.set_element_text(&elm, text);
            }
        }

        // Step 7: per-node `create` hook, now that children are attached.
        if let Some(create) = vnode.data.as_ref().and_then(|d| d.hook.create.clone()) {
            create(&empty, vnode);
        }

        elm
    };

    vnode.elm = Some(elm.clone());

    // Step 8: defer `insert` until the subtree is fully attached.
    if let Some(insert) = vnode.data.as_ref().and_then(|d| d.hook.insert.clone()) {
        queue.push((insert, elm.clone()));
    }

    elm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperscript::h;
    use crate::module::ModuleHooks;
    use crate::test_dom::TestDom;

    fn registry() -> ModuleRegistry<usize> {
        ModuleRegistry::new(Vec::<ModuleHooks<usize>>::new())
    }

    #[test]
    fn creates_element_with_id_and_class() {
        let dom = TestDom::new();
        let mut v = h::<usize>("div#app.container.dark", ());
        let mut queue = InsertionQueue::new();
        let elm = create_elm(&dom, &registry(), &mut v, &mut queue);
        assert_eq!(dom.tag_name(&elm), "div");
        assert_eq!(dom.id_of(&elm).as_deref(), Some("app"));
        assert_eq!(dom.class_of(&elm).as_deref(), Some("container dark"));
    }

    #[test]
    fn creates_nested_children_in_order() {
        let dom = TestDom::new();
        let mut v: VNode<usize> = h(
            "ul",
            crate::hyperscript::children(["a", "b"].map(|t| h::<usize>("li", t))),
        );
        let mut queue = InsertionQueue::new();
        let elm = create_elm(&dom, &registry(), &mut v, &mut queue);
        assert_eq!(dom.child_tags(&elm), vec!["li", "li"]);
    }

    #[test]
    fn comment_node_carries_text() {
        let dom = TestDom::new();
        let mut v: VNode<usize> = VNode::comment("marker");
        let mut queue = InsertionQueue::new();
        let elm = create_elm(&dom, &registry(), &mut v, &mut queue);
        assert_eq!(dom.text_of(&elm).as_deref(), Some("marker"));
    }
}
