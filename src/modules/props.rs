//! The `props` module: direct host-object properties (`value`, `checked`,
//! `selected`...) that must be set as properties rather than attributes,
//! stored under the `"props"` extension key.

use fxhash::FxHashMap;

use crate::dom::DomApi;
use crate::module::ModuleHooks;
use crate::node::VNode;

const EXTRA_KEY: &str = "props";

pub trait PropsApi: DomApi {
    fn set_property(&self, element: &Self::Node, name: &str, value: &str);
}

pub fn props(map: impl IntoIterator<Item = (String, String)>) -> FxHashMap<String, String> {
    map.into_iter().collect()
}

fn read_props<N>(vnode: &VNode<N>) -> Option<&FxHashMap<String, String>> {
    vnode
        .data
        .as_ref()?
        .extra
        .get(EXTRA_KEY)?
        .downcast_ref::<FxHashMap<String, String>>()
}

pub fn props_module<D: PropsApi + Clone + 'static>(dom: D) -> ModuleHooks<D::Node> {
    let create_dom = dom.clone();
    let update_dom = dom;

    ModuleHooks::new()
        .with_create(move |_empty, vnode| apply(&create_dom, None, vnode))
        .with_update(move |old, vnode| apply(&update_dom, Some(old), vnode))
}

// Unlike `attrs`, properties are never torn back down to a "removed" state —
// there is no DOM-level inverse of `elm.value = x` — so only changed or new
// entries are written.
fn apply<D: PropsApi>(dom: &D, old: Option<&VNode<D::Node>>, vnode: &VNode<D::Node>) {
    let Some(elm) = vnode.elm.clone() else { return };
    let empty = FxHashMap::default();
    let old_props = old.and_then(read_props).unwrap_or(&empty);
    let new_props = read_props(vnode).unwrap_or(&empty);

    for (name, value) in new_props {
        if old_props.get(name) != Some(value) {
            dom.set_property(&elm, name, value);
        }
    }
}
