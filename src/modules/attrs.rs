//! The `attrs` module: plain string HTML attributes, stored under the
//! `"attrs"` extension key and diffed on every update.

use fxhash::FxHashMap;

use crate::dom::DomApi;
use crate::module::ModuleHooks;
use crate::node::VNode;

const EXTRA_KEY: &str = "attrs";

/// The backend capability this module needs: setting and clearing a plain
/// string attribute on a live element.
pub trait AttrsApi: DomApi {
    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, element: &Self::Node, name: &str);
}

/// Attach `attrs: FxHashMap<String, String>` data to a VNode before passing
/// it to `h`.
pub fn attrs(map: impl IntoIterator<Item = (String, String)>) -> FxHashMap<String, String> {
    map.into_iter().collect()
}

fn read_attrs<N>(vnode: &VNode<N>) -> Option<&FxHashMap<String, String>> {
    vnode
        .data
        .as_ref()?
        .extra
        .get(EXTRA_KEY)?
        .downcast_ref::<FxHashMap<String, String>>()
}

/// Build the module's hook bundle, closed over a backend handle so the
/// hooks can reach the live element directly.
pub fn attrs_module<D: AttrsApi + Clone + 'static>(dom: D) -> ModuleHooks<D::Node> {
    let create_dom = dom.clone();
    let update_dom = dom;

    ModuleHooks::new()
        .with_create(move |_empty, vnode| apply(&create_dom, None, vnode))
        .with_update(move |old, vnode| apply(&update_dom, Some(old), vnode))
}

fn apply<D: AttrsApi>(dom: &D, old: Option<&VNode<D::Node>>, vnode: &VNode<D::Node>) {
    let Some(elm) = vnode.elm.clone() else { return };
    let empty = FxHashMap::default();
    let old_attrs = old.and_then(read_attrs).unwrap_or(&empty);
    let new_attrs = read_attrs(vnode).unwrap_or(&empty);

    for (name, value) in new_attrs {
        if old_attrs.get(name) != Some(value) {
            dom.set_attribute(&elm, name, value);
        }
    }
    for name in old_attrs.keys() {
        if !new_attrs.contains_key(name) {
            dom.remove_attribute(&elm, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create::{create_elm, InsertionQueue};
    use crate::hyperscript::h_with;
    use crate::module::ModuleRegistry;
    use crate::node::VNodeData;
    use crate::test_dom::TestDom;

    fn with_attrs(sel: &str, pairs: &[(&str, &str)]) -> VNode<usize> {
        let mut data = VNodeData::new();
        data.extra.insert(
            EXTRA_KEY,
            Box::new(attrs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))),
        );
        h_with(sel, Some(data), Vec::new())
    }

    #[test]
    fn sets_attributes_on_create() {
        let dom = TestDom::new();
        let registry = ModuleRegistry::new(vec![attrs_module(dom.clone())]);
        let mut v = with_attrs("a", &[("href", "/home"), ("target", "_blank")]);
        let mut queue = InsertionQueue::new();
        let elm = create_elm(&dom, &registry, &mut v, &mut queue);
        assert_eq!(dom.attribute(&elm, "href").as_deref(), Some("/home"));
        assert_eq!(dom.attribute(&elm, "target").as_deref(), Some("_blank"));
    }

    #[test]
    fn removes_attribute_dropped_between_updates() {
        let dom = TestDom::new();
        let registry = ModuleRegistry::new(vec![attrs_module(dom.clone())]);
        let mut old = with_attrs("a", &[("href", "/home")]);
        let mut queue = InsertionQueue::new();
        create_elm(&dom, &registry, &mut old, &mut queue);

        let mut new = with_attrs("a", &[]);
        new.elm = old.elm.clone();
        apply(&dom, Some(&old), &new);
        assert_eq!(dom.attribute(&old.elm.unwrap(), "href"), None);
    }
}
