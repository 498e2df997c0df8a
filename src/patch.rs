//! Single-node patching (§4.3) and the keyed children diff (§4.4) — the core
//! of the reconciler.

use fxhash::FxHashMap;

use crate::create::{create_elm, InsertionQueue};
use crate::dom::DomApi;
use crate::module::ModuleRegistry;
use crate::node::{same_vnode, Key, VNode};
use crate::remove::remove_vnodes;

/// Below this many live candidates, a linear scan for a matching key finds
/// it faster than building (and hashing into) a `FxHashMap` would (§9
/// "flat-hash or small-array scan below a threshold").
const KEYED_SCAN_THRESHOLD: usize = 8;

/// Reconcile `vnode` against `old_vnode`, which are already known to be the
/// same element (`same_vnode`). Carries `elm` forward, runs hooks, and
/// resolves the children-vs-text cases (§4.3).
///
/// §4.3 step 3's same-reference short-circuit has no observable case here:
/// `old_vnode`/`vnode` arrive as two distinct `&mut` parameters, and Rust's
/// aliasing rules already forbid a caller from holding two live mutable
/// borrows of one `VNode`, so the two can never be identical (see
/// DESIGN.md).
pub fn patch_vnode<D: DomApi + Clone + 'static>(
    dom: &D,
    modules: &ModuleRegistry<D::Node>,
    old_vnode: &mut VNode<D::Node>,
    vnode: &mut VNode<D::Node>,
    queue: &mut InsertionQueue<D::Node>,
) {
    if let Some(prepatch) = vnode.data.as_ref().and_then(|d| d.hook.prepatch.clone()) {
        prepatch(old_vnode, vnode);
    }

    let elm = old_vnode.elm.clone().expect("old vnode must already be materialized");
    vnode.elm = Some(elm.clone());

    // Step 4: module and node update hooks only run when the new vnode
    // actually carries a data record.
    if vnode.data.is_some() {
        modules.run_update(old_vnode, vnode);
        if let Some(update) = vnode.data.as_ref().and_then(|d| d.hook.update.clone()) {
            update(old_vnode, vnode);
        }
    }

    match (&vnode.text, vnode.children.take()) {
        (None, Some(mut new_children)) => {
            if let Some(old_children) = old_vnode.children.take() {
                update_children(dom, modules, &elm, old_children, &mut new_children, queue);
            } else {
                if old_vnode.text.is_some() {
                    dom.set_text_content(&elm, "");
                }
                for child in new_children.iter_mut() {
                    let child_elm = create_elm(dom, modules, child, queue);
                    dom.append_child(&elm, &child_elm);
                }
            }
            vnode.children = Some(new_children);
        }
        (None, None) => {
            if let Some(old_children) = old_vnode.children.take() {
                remove_vnodes(dom, modules, &elm, &old_children);
            } else if old_vnode.text.is_some() {
                dom.set_text_content(&elm, "");
            }
        }
        (Some(text), new_children) => {
            if old_vnode.text.as_deref() != Some(text.as_str()) {
                if let Some(old_children) = old_vnode.children.take() {
                    remove_vnodes(dom, modules, &elm, &old_children);
                }
                dom.set_text_content(&elm, text);
            }
            vnode.children = new_children;
        }
    }

    if let Some(postpatch) = vnode.data.as_ref().and_then(|d| d.hook.postpatch.clone()) {
        postpatch(old_vnode, vnode);
    }
}

/// The keyed two-pointer diff (§4.4): four cursors close in from both ends,
/// matching by identity at the cursors before falling back to a lazily-built
/// key map. Deliberately not an LIS-based algorithm.
fn update_children<D: DomApi + Clone + 'static>(
    dom: &D,
    modules: &ModuleRegistry<D::Node>,
    parent: &D::Node,
    old_children: Vec<VNode<D::Node>>,
    new_children: &mut [VNode<D::Node>],
    queue: &mut InsertionQueue<D::Node>,
) {
    let mut old_ch: Vec<Option<VNode<D::Node>>> = old_children.into_iter().map(Some).collect();

    // Signed cursors: an empty side starts with `end_idx == -1`, which keeps
    // every loop/tail condition below a plain comparison instead of needing
    // underflow-guarded unsigned arithmetic.
    let mut old_start_idx: isize = 0;
    let mut old_end_idx: isize = old_ch.len() as isize - 1;
    let mut new_start_idx: isize = 0;
    let mut new_end_idx: isize = new_children.len() as isize - 1;

    let mut key_to_old_idx: Option<FxHashMap<Key, usize>> = None;

    while old_start_idx <= old_end_idx && new_start_idx <= new_end_idx {
        let (os, oe, ns, ne) = (
            old_start_idx as usize,
            old_end_idx as usize,
            new_start_idx as usize,
            new_end_idx as usize,
        );

        if old_ch[os].is_none() {
            old_start_idx += 1;
            continue;
        }
        if old_ch[oe].is_none() {
            old_end_idx -= 1;
            continue;
        }

        if same_vnode(old_ch[os].as_ref().unwrap(), &new_children[ns]) {
            log::trace!("updateChildren: old_start == new_start at ({os}, {ns})");
            let mut old_node = old_ch[os].take().unwrap();
            patch_vnode(dom, modules, &mut old_node, &mut new_children[ns], queue);
            old_start_idx += 1;
            new_start_idx += 1;
            continue;
        }

        if same_vnode(old_ch[oe].as_ref().unwrap(), &new_children[ne]) {
            log::trace!("updateChildren: old_end == new_end at ({oe}, {ne})");
            let mut old_node = old_ch[oe].take().unwrap();
            patch_vnode(dom, modules, &mut old_node, &mut new_children[ne], queue);
            old_end_idx -= 1;
            new_end_idx -= 1;
            continue;
        }

        if same_vnode(old_ch[os].as_ref().unwrap(), &new_children[ne]) {
            log::trace!("updateChildren: old_start == new_end at ({os}, {ne}), node moved right");
            let mut old_node = old_ch[os].take().unwrap();
            patch_vnode(dom, modules, &mut old_node, &mut new_children[ne], queue);
            let old_end_elm = old_ch[oe].as_ref().unwrap().elm.clone().unwrap();
            let reference = dom.next_sibling(&old_end_elm);
            dom.insert_before(parent, old_node.elm.as_ref().unwrap(), reference.as_ref());
            old_start_idx += 1;
            new_end_idx -= 1;
            continue;
        }

        if same_vnode(old_ch[oe].as_ref().unwrap(), &new_children[ns]) {
            log::trace!("updateChildren: old_end == new_start at ({oe}, {ns}), node moved left");
            let mut old_node = old_ch[oe].take().unwrap();
            patch_vnode(dom, modules, &mut old_node, &mut new_children[ns], queue);
            let reference = old_ch[os].as_ref().and_then(|n| n.elm.clone());
            dom.insert_before(parent, old_node.elm.as_ref().unwrap(), reference.as_ref());
            old_end_idx -= 1;
            new_start_idx += 1;
            continue;
        }

        let remaining = oe - os + 1;
        let idx_in_old = new_children[ns].key.as_ref().and_then(|new_key| {
            if remaining <= KEYED_SCAN_THRESHOLD {
                (os..=oe).find(|idx| {
                    old_ch[*idx].as_ref().and_then(|n| n.key.as_ref()) == Some(new_key)
                })
            } else {
                let key_map = key_to_old_idx.get_or_insert_with(|| build_key_map(&old_ch, os, oe));
                key_map.get(new_key).copied()
            }
        });
        log::trace!("updateChildren: key-map fallback for new_start {ns}, found old idx {idx_in_old:?}");
        let reference = old_ch[os].as_ref().and_then(|n| n.elm.clone());

        match idx_in_old {
            None => {
                let new_elm = create_elm(dom, modules, &mut new_children[ns], queue);
                dom.insert_before(parent, &new_elm, reference.as_ref());
            }
            Some(idx) => {
                let same_sel = old_ch[idx].as_ref().unwrap().sel == new_children[ns].sel;
                if !same_sel {
                    let new_elm = create_elm(dom, modules, &mut new_children[ns], queue);
                    dom.insert_before(parent, &new_elm, reference.as_ref());
                } else {
                    let mut moved = old_ch[idx].take().unwrap();
                    patch_vnode(dom, modules, &mut moved, &mut new_children[ns], queue);
                    dom.insert_before(parent, moved.elm.as_ref().unwrap(), reference.as_ref());
                }
            }
        }
        new_start_idx += 1;
    }

    if old_start_idx > old_end_idx {
        if new_start_idx <= new_end_idx {
            let reference = new_children
                .get((new_end_idx + 1) as usize)
                .and_then(|n| n.elm.clone());
            for child in new_children[new_start_idx as usize..=new_end_idx as usize].iter_mut() {
                let child_elm = create_elm(dom, modules, child, queue);
                dom.insert_before(parent, &child_elm, reference.as_ref());
            }
        }
    } else if new_start_idx > new_end_idx {
        let leftover: Vec<VNode<D::Node>> = old_ch[old_start_idx as usize..=old_end_idx as usize]
            .iter_mut()
            .filter_map(Option::take)
            .collect();
        remove_vnodes(dom, modules, parent, &leftover);
    }
}

/// Build a key→index map over the still-live `old_ch[os..=oe]` window. A
/// second vnode claiming a key already seen keeps the earlier mapping (last
/// write does *not* win here, matching the spec's "first occurrence" map
/// semantics) and is logged, since a correct application never has this.
fn build_key_map<N>(old_ch: &[Option<VNode<N>>], os: usize, oe: usize) -> FxHashMap<Key, usize> {
    let mut map = FxHashMap::default();
    for idx in os..=oe {
        if let Some(key) = old_ch[idx].as_ref().and_then(|n| n.key.clone()) {
            match map.entry(key) {
                std::collections::hash_map::Entry::Occupied(_) => {
                    log::warn!("updateChildren: duplicate key in old children at index {idx}");
                }
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperscript::{children, h, keyed};
    use crate::module::ModuleHooks;
    use crate::test_dom::TestDom;

    fn registry() -> ModuleRegistry<usize> {
        ModuleRegistry::new(Vec::<ModuleHooks<usize>>::new())
    }

    fn mount(dom: &TestDom, vnode: &mut VNode<usize>) -> usize {
        let parent = dom.create_element("root");
        let mut queue = InsertionQueue::new();
        let elm = create_elm(dom, &registry(), vnode, &mut queue);
        dom.append_child(&parent, &elm);
        parent
    }

    #[test]
    fn reorders_keyed_children() {
        let dom = TestDom::new();
        let mut old: VNode<usize> = h(
            "ul",
            children([
                keyed(h::<usize>("li", "a"), "a"),
                keyed(h::<usize>("li", "b"), "b"),
                keyed(h::<usize>("li", "c"), "c"),
            ]),
        );
        let _parent = mount(&dom, &mut old);
        let mut queue = InsertionQueue::new();

        let mut new: VNode<usize> = h(
            "ul",
            children([
                keyed(h::<usize>("li", "c"), "c"),
                keyed(h::<usize>("li", "a"), "a"),
                keyed(h::<usize>("li", "b"), "b"),
            ]),
        );
        patch_vnode(&dom, &registry(), &mut old, &mut new, &mut queue);

        let ul = new.elm.unwrap();
        let order: Vec<String> = dom
            .children_of(&ul)
            .iter()
            .map(|c| dom.text_of(c).unwrap())
            .collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn removes_and_adds_keyed_children() {
        let dom = TestDom::new();
        let mut old: VNode<usize> = h(
            "ul",
            children([
                keyed(h::<usize>("li", "a"), "a"),
                keyed(h::<usize>("li", "b"), "b"),
            ]),
        );
        mount(&dom, &mut old);
        let mut queue = InsertionQueue::new();

        let mut new: VNode<usize> = h(
            "ul",
            children([
                keyed(h::<usize>("li", "a"), "a"),
                keyed(h::<usize>("li", "d"), "d"),
            ]),
        );
        patch_vnode(&dom, &registry(), &mut old, &mut new, &mut queue);

        let ul = new.elm.unwrap();
        assert_eq!(dom.children_of(&ul).len(), 2);
        let order: Vec<String> = dom
            .children_of(&ul)
            .iter()
            .map(|c| dom.text_of(c).unwrap())
            .collect();
        assert_eq!(order, vec!["a", "d"]);
    }

    #[test]
    fn switches_text_to_children() {
        let dom = TestDom::new();
        let mut old: VNode<usize> = h("p", "hello");
        mount(&dom, &mut old);
        let mut queue = InsertionQueue::new();

        let mut new: VNode<usize> = h("p", children([h::<usize>("span", "world")]));
        patch_vnode(&dom, &registry(), &mut old, &mut new, &mut queue);

        let p = new.elm.unwrap();
        assert_eq!(dom.child_tags(&p), vec!["span"]);
    }

    #[test]
    fn switches_children_to_text() {
        let dom = TestDom::new();
        let mut old: VNode<usize> = h("p", children([h::<usize>("span", "world")]));
        mount(&dom, &mut old);
        let mut queue = InsertionQueue::new();

        let mut new: VNode<usize> = h("p", "hello");
        patch_vnode(&dom, &registry(), &mut old, &mut new, &mut queue);

        let p = new.elm.unwrap();
        assert_eq!(dom.text_of(&p).as_deref(), Some("hello"));
        assert!(dom.children_of(&p).is_empty());
    }
}
