use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::{seq::SliceRandom, SeedableRng};

use vnode_dom::test_dom::TestDom;
use vnode_dom::{children, h, init, keyed, DomApi, PatchTarget, VNode};

fn row(id: u32) -> VNode<usize> {
    keyed(h(format!("tr.row-{id}"), format!("row {id}")), id as i64)
}

fn table(ids: &[u32]) -> VNode<usize> {
    h("table", children(ids.iter().map(|id| row(*id))))
}

fn reorder_1000(c: &mut Criterion) {
    let dom = TestDom::new();
    let root = dom.create_element("div");
    let patcher = init(dom, Vec::new());

    let ids: Vec<u32> = (0..1000).collect();
    let mut current = patcher.patch(PatchTarget::Element(root), table(&ids));

    let mut rng = SmallRng::seed_from_u64(7);
    let mut shuffled = ids.clone();

    c.bench_function("reorder_1000_keyed_rows", |b| {
        b.iter(|| {
            shuffled.shuffle(&mut rng);
            let prev = std::mem::take(&mut current);
            current = patcher.patch(prev, black_box(table(&shuffled)));
        });
    });
}

criterion_group!(benches, reorder_1000);
criterion_main!(benches);
