//! The `eventlisteners` module: DOM event callbacks, stored under the
//! `"on"` extension key. Unlike real snabbdom's single long-lived proxy
//! listener, this reference implementation re-registers on every update —
//! simpler to reason about, correct, and the cost only matters for
//! high-frequency re-renders of listener-heavy nodes.

use std::rc::Rc;

use fxhash::FxHashMap;

use crate::dom::DomApi;
use crate::module::ModuleHooks;
use crate::node::VNode;

const EXTRA_KEY: &str = "on";

pub type Listener = Rc<dyn Fn()>;

pub trait EventListenersApi: DomApi {
    fn add_event_listener(&self, element: &Self::Node, event: &str, listener: Listener);
    fn remove_event_listener(&self, element: &Self::Node, event: &str);
}

pub fn listeners(map: impl IntoIterator<Item = (String, Listener)>) -> FxHashMap<String, Listener> {
    map.into_iter().collect()
}

fn read_listeners<N>(vnode: &VNode<N>) -> Option<&FxHashMap<String, Listener>> {
    vnode
        .data
        .as_ref()?
        .extra
        .get(EXTRA_KEY)?
        .downcast_ref::<FxHashMap<String, Listener>>()
}

pub fn eventlisteners_module<D: EventListenersApi + Clone + 'static>(dom: D) -> ModuleHooks<D::Node> {
    let create_dom = dom.clone();
    let update_dom = dom.clone();
    let destroy_dom = dom;

    ModuleHooks::new()
        .with_create(move |_empty, vnode| apply(&create_dom, None, vnode))
        .with_update(move |old, vnode| apply(&update_dom, Some(old), vnode))
        .with_destroy(move |vnode| detach(&destroy_dom, vnode))
}

fn apply<D: EventListenersApi>(dom: &D, old: Option<&VNode<D::Node>>, vnode: &VNode<D::Node>) {
    let Some(elm) = vnode.elm.clone() else { return };
    let empty = FxHashMap::default();
    let old_on = old.and_then(read_listeners).unwrap_or(&empty);
    let new_on = read_listeners(vnode).unwrap_or(&empty);

    for name in old_on.keys() {
        dom.remove_event_listener(&elm, name);
    }
    for (name, listener) in new_on {
        dom.add_event_listener(&elm, name, listener.clone());
    }
}

fn detach<D: EventListenersApi>(dom: &D, vnode: &VNode<D::Node>) {
    let (Some(elm), Some(on)) = (vnode.elm.clone(), read_listeners(vnode)) else { return };
    for name in on.keys() {
        dom.remove_event_listener(&elm, name);
    }
}
