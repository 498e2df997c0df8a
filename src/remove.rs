//! Subtree teardown (§4.5): depth-first `destroy` notification, and delayed
//! `remove` with module/node listeners racing to detach the element only
//! once every one of them has called back.

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::DomApi;
use crate::module::ModuleRegistry;
use crate::node::VNode;

/// Notify every `destroy` hook — module hooks, then the node's own hook —
/// on `vnode` and then recurse into its children. Fires even for nodes with
/// no `data`, since children further down the subtree may still have
/// destroy obligations of their own.
pub fn invoke_destroy_hook<N>(modules: &ModuleRegistry<N>, vnode: &VNode<N>) {
    if let Some(destroy) = vnode.data.as_ref().and_then(|d| d.hook.destroy.clone()) {
        destroy(vnode);
    }
    modules.run_destroy(vnode);

    if let Some(children) = vnode.children.as_ref() {
        for child in children {
            invoke_destroy_hook(modules, child);
        }
    }
}

/// Detach and destroy a contiguous run of old children of `parent`. A text
/// node (no `sel`) is removed immediately; an element runs its destroy hooks
/// first, then waits for every remove listener — the registered module
/// `remove` hooks plus one more for the node's own `remove` hook (or, absent
/// one, for the unconditional final call) — before the host node actually
/// leaves the tree. A listener may call back synchronously or much later
/// (e.g. once a CSS transition ends), so `dom` must be cheaply cloneable to
/// outlive this call (§4.5).
pub fn remove_vnodes<D: DomApi + Clone + 'static>(
    dom: &D,
    modules: &ModuleRegistry<D::Node>,
    parent: &D::Node,
    vnodes: &[VNode<D::Node>],
) {
    for child in vnodes {
        let Some(elm) = child.elm.clone() else { continue };

        if child.sel.is_none() {
            dom.remove_child(parent, &elm);
            continue;
        }

        invoke_destroy_hook(modules, child);

        let listeners = modules.remove_hook_count() + 1;
        let remaining = Rc::new(Cell::new(listeners));
        let callback: Rc<dyn Fn()> = {
            let remaining = remaining.clone();
            let dom = dom.clone();
            let parent = parent.clone();
            let elm = elm.clone();
            Rc::new(move || {
                let left = remaining.get() - 1;
                remaining.set(left);
                if left == 0 {
                    dom.remove_child(&parent, &elm);
                }
            })
        };

        modules.run_remove(child, callback.clone());

        if let Some(remove_hook) = child.data.as_ref().and_then(|d| d.hook.remove.clone()) {
            remove_hook(child, callback);
        } else {
            callback();
        }
    }
}
