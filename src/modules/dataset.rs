//! The `dataset` module: `data-*` attributes, stored under the `"dataset"`
//! extension key and diffed like `attrs`.

use fxhash::FxHashMap;

use crate::dom::DomApi;
use crate::module::ModuleHooks;
use crate::node::VNode;

const EXTRA_KEY: &str = "dataset";

pub trait DatasetApi: DomApi {
    fn set_data_attribute(&self, element: &Self::Node, name: &str, value: &str);
    fn remove_data_attribute(&self, element: &Self::Node, name: &str);
}

pub fn dataset(map: impl IntoIterator<Item = (String, String)>) -> FxHashMap<String, String> {
    map.into_iter().collect()
}

fn read_dataset<N>(vnode: &VNode<N>) -> Option<&FxHashMap<String, String>> {
    vnode
        .data
        .as_ref()?
        .extra
        .get(EXTRA_KEY)?
        .downcast_ref::<FxHashMap<String, String>>()
}

pub fn dataset_module<D: DatasetApi + Clone + 'static>(dom: D) -> ModuleHooks<D::Node> {
    let create_dom = dom.clone();
    let update_dom = dom;

    ModuleHooks::new()
        .with_create(move |_empty, vnode| apply(&create_dom, None, vnode))
        .with_update(move |old, vnode| apply(&update_dom, Some(old), vnode))
}

fn apply<D: DatasetApi>(dom: &D, old: Option<&VNode<D::Node>>, vnode: &VNode<D::Node>) {
    let Some(elm) = vnode.elm.clone() else { return };
    let empty = FxHashMap::default();
    let old_data = old.and_then(read_dataset).unwrap_or(&empty);
    let new_data = read_dataset(vnode).unwrap_or(&empty);

    for (name, value) in new_data {
        if old_data.get(name) != Some(value) {
            dom.set_data_attribute(&elm, name, value);
        }
    }
    for name in old_data.keys() {
        if !new_data.contains_key(name) {
            dom.remove_data_attribute(&elm, name);
        }
    }
}
