use std::cell::RefCell;
use std::rc::Rc;

use vnode_dom::test_dom::TestDom;
use vnode_dom::{h_with, init, DomApi, PatchTarget, VNode, VNodeData};

fn traced(sel: &str, log: Rc<RefCell<Vec<&'static str>>>) -> VNode<usize> {
    let mut data = VNodeData::new();

    let l = log.clone();
    data.hook.create = Some(Rc::new(move |_empty, _v| l.borrow_mut().push("create")));

    let l = log.clone();
    data.hook.insert = Some(Rc::new(move |_elm| l.borrow_mut().push("insert")));

    let l = log.clone();
    data.hook.destroy = Some(Rc::new(move |_v| l.borrow_mut().push("destroy")));

    let l = log.clone();
    data.hook.remove = Some(Rc::new(move |_v, cb| {
        l.borrow_mut().push("remove");
        cb();
    }));

    h_with(sel, Some(data), Vec::new())
}

#[test]
fn create_and_insert_fire_in_order_on_first_mount() {
    let dom = TestDom::new();
    let root = dom.create_element("div");
    let patcher = init(dom, Vec::new());

    let log = Rc::new(RefCell::new(Vec::new()));
    patcher.patch(PatchTarget::Element(root), traced("section", log.clone()));

    assert_eq!(*log.borrow(), vec!["create", "insert"]);
}

#[test]
fn destroy_and_remove_fire_when_a_node_is_dropped_from_the_tree() {
    let dom = TestDom::new();
    let root = dom.create_element("div");
    let patcher = init(dom, Vec::new());

    let log = Rc::new(RefCell::new(Vec::new()));
    let mounted = patcher.patch(PatchTarget::Element(root), traced("section", log.clone()));
    log.borrow_mut().clear();

    // Root selector changes, so the whole subtree is destroyed and removed.
    patcher.patch(mounted, VNode::<usize>::comment("gone"));

    assert_eq!(*log.borrow(), vec!["destroy", "remove"]);
}
