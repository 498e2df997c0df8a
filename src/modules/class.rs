//! The `class` module: toggles individual class tokens, stored under the
//! `"class"` extension key as name-to-bool pairs (unlike the selector's
//! baked-in classes, these can be turned on and off across updates).

use fxhash::FxHashMap;

use crate::dom::DomApi;
use crate::module::ModuleHooks;
use crate::node::VNode;

const EXTRA_KEY: &str = "class";

pub trait ClassApi: DomApi {
    fn toggle_class(&self, element: &Self::Node, name: &str, on: bool);
}

pub fn classes(map: impl IntoIterator<Item = (String, bool)>) -> FxHashMap<String, bool> {
    map.into_iter().collect()
}

fn read_classes<N>(vnode: &VNode<N>) -> Option<&FxHashMap<String, bool>> {
    vnode
        .data
        .as_ref()?
        .extra
        .get(EXTRA_KEY)?
        .downcast_ref::<FxHashMap<String, bool>>()
}

pub fn class_module<D: ClassApi + Clone + 'static>(dom: D) -> ModuleHooks<D::Node> {
    let create_dom = dom.clone();
    let update_dom = dom;

    ModuleHooks::new()
        .with_create(move |_empty, vnode| apply(&create_dom, None, vnode))
        .with_update(move |old, vnode| apply(&update_dom, Some(old), vnode))
}

fn apply<D: ClassApi>(dom: &D, old: Option<&VNode<D::Node>>, vnode: &VNode<D::Node>) {
    let Some(elm) = vnode.elm.clone() else { return };
    let empty = FxHashMap::default();
    let old_classes = old.and_then(read_classes).unwrap_or(&empty);
    let new_classes = read_classes(vnode).unwrap_or(&empty);

    for (name, on) in new_classes {
        if old_classes.get(name) != Some(on) {
            dom.toggle_class(&elm, name, *on);
        }
    }
    for name in old_classes.keys() {
        if !new_classes.contains_key(name) {
            dom.toggle_class(&elm, name, false);
        }
    }
}
