//! The `style` module: inline CSS declarations, stored under the `"style"`
//! extension key and diffed like `attrs`.

use fxhash::FxHashMap;

use crate::dom::DomApi;
use crate::module::ModuleHooks;
use crate::node::VNode;

const EXTRA_KEY: &str = "style";

pub trait StyleApi: DomApi {
    fn set_style_property(&self, element: &Self::Node, name: &str, value: &str);
    fn remove_style_property(&self, element: &Self::Node, name: &str);
}

pub fn style(map: impl IntoIterator<Item = (String, String)>) -> FxHashMap<String, String> {
    map.into_iter().collect()
}

fn read_style<N>(vnode: &VNode<N>) -> Option<&FxHashMap<String, String>> {
    vnode
        .data
        .as_ref()?
        .extra
        .get(EXTRA_KEY)?
        .downcast_ref::<FxHashMap<String, String>>()
}

pub fn style_module<D: StyleApi + Clone + 'static>(dom: D) -> ModuleHooks<D::Node> {
    let create_dom = dom.clone();
    let update_dom = dom;

    ModuleHooks::new()
        .with_create(move |_empty, vnode| apply(&create_dom, None, vnode))
        .with_update(move |old, vnode| apply(&update_dom, Some(old), vnode))
}

fn apply<D: StyleApi>(dom: &D, old: Option<&VNode<D::Node>>, vnode: &VNode<D::Node>) {
    let Some(elm) = vnode.elm.clone() else { return };
    let empty = FxHashMap::default();
    let old_style = old.and_then(read_style).unwrap_or(&empty);
    let new_style = read_style(vnode).unwrap_or(&empty);

    for (name, value) in new_style {
        if old_style.get(name) != Some(value) {
            dom.set_style_property(&elm, name, value);
        }
    }
    for name in old_style.keys() {
        if !new_style.contains_key(name) {
            dom.remove_style_property(&elm, name);
        }
    }
}
