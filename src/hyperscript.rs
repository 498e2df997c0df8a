//! The hyperscript builder (§4.1): an overloaded argument parser that
//! produces VNodes and applies SVG namespace propagation.
//!
//! Rust has no runtime argument-type dispatch, so the "small set of
//! overloads" the design notes in §9 ask for are modeled as a couple of
//! plain functions (`h`, `h_with`) plus an [`HArg`] trait that absorbs the
//! disambiguation the original does at runtime: "ordered sequence ->
//! children", "primitive -> single text child", "record with a `sel` field
//! -> one-element children list", "any other record -> data".

use crate::node::{Key, VNode, VNodeData};
use crate::selector::{parse_selector, SVG_NS};

/// Something that can appear as a single child: either a VNode outright, or
/// a primitive promoted to a text-only VNode, or nothing at all.
///
/// A `None` child is the sparse-list case the spec leaves as an open
/// question (§9): the original skips `null` children silently, and so do
/// we, via `Option<VNode<N>>`'s `None` arm never making it into the
/// assembled children vector.
pub trait IntoChild<N> {
    fn into_child(self) -> Option<VNode<N>>;
}

impl<N> IntoChild<N> for VNode<N> {
    fn into_child(self) -> Option<VNode<N>> {
        Some(self)
    }
}

impl<N> IntoChild<N> for Option<VNode<N>> {
    fn into_child(self) -> Option<VNode<N>> {
        self
    }
}

macro_rules! impl_into_child_display {
    ($($t:ty),*) => {
        $(
            impl<N> IntoChild<N> for $t {
                fn into_child(self) -> Option<VNode<N>> {
                    Some(VNode::text(self.to_string()))
                }
            }
        )*
    };
}

impl_into_child_display!(&str, String, i32, i64, u32, u64, f32, f64);

/// Build a dense children vector from a sequence of [`IntoChild`] items,
/// dropping `None`s.
pub fn children<N, I, C>(items: I) -> Vec<VNode<N>>
where
    I: IntoIterator<Item = C>,
    C: IntoChild<N>,
{
    items.into_iter().filter_map(IntoChild::into_child).collect()
}

/// The disambiguated second argument to `h`: either nothing, a data record,
/// a ready-made children list, or a primitive stored as the node's own text
/// (§4.1: text only gets wrapped into a child when it appears *inside* an
/// already-given children array, via [`IntoChild`] — not when it's `h`'s bare
/// second argument).
pub enum HArg<N> {
    None,
    Data(VNodeData<N>),
    Children(Vec<VNode<N>>),
    Text(String),
}

/// Types that can appear in `h`'s second position, matching §4.1's
/// disambiguation rules.
pub trait IntoHArg<N> {
    fn into_h_arg(self) -> HArg<N>;
}

impl<N> IntoHArg<N> for () {
    fn into_h_arg(self) -> HArg<N> {
        HArg::None
    }
}

impl<N> IntoHArg<N> for VNodeData<N> {
    fn into_h_arg(self) -> HArg<N> {
        HArg::Data(self)
    }
}

impl<N> IntoHArg<N> for Vec<VNode<N>> {
    fn into_h_arg(self) -> HArg<N> {
        HArg::Children(self)
    }
}

/// A single VNode passed where children were expected is wrapped as a
/// one-element children list (§4.1).
impl<N> IntoHArg<N> for VNode<N> {
    fn into_h_arg(self) -> HArg<N> {
        HArg::Children(vec![self])
    }
}

impl<N> IntoHArg<N> for &str {
    fn into_h_arg(self) -> HArg<N> {
        HArg::Text(self.to_owned())
    }
}

impl<N> IntoHArg<N> for String {
    fn into_h_arg(self) -> HArg<N> {
        HArg::Text(self)
    }
}

/// Build a VNode from `(sel)`, `(sel, data)`, `(sel, children)`, or
/// `(sel, text)`. For the full `(sel, data, children)` form, see [`h_with`].
pub fn h<N>(sel: impl Into<String>, arg: impl IntoHArg<N>) -> VNode<N> {
    match arg.into_h_arg() {
        HArg::None => build(sel, None, Content::None),
        HArg::Data(data) => build(sel, Some(data), Content::None),
        HArg::Children(kids) => build(sel, None, Content::Children(kids)),
        HArg::Text(text) => build(sel, None, Content::Text(text)),
    }
}

/// Build a VNode with an explicit data record and children list.
pub fn h_with<N>(
    sel: impl Into<String>,
    data: Option<VNodeData<N>>,
    kids: Vec<VNode<N>>,
) -> VNode<N> {
    build(sel, data, Content::Children(kids))
}

/// Either no body, a children list, or a text body — the three shapes a
/// freshly built VNode's `children`/`text` fields can take (never both).
enum Content<N> {
    None,
    Text(String),
    Children(Vec<VNode<N>>),
}

fn build<N>(sel: impl Into<String>, data: Option<VNodeData<N>>, content: Content<N>) -> VNode<N> {
    let sel = sel.into();

    let (children, text) = match content {
        Content::None => (None, None),
        Content::Text(text) => (None, Some(text)),
        Content::Children(kids) if kids.is_empty() => (None, None),
        Content::Children(kids) => (Some(kids), None),
    };

    // Keys are attached after construction via `keyed`, not through `data`
    // (see DESIGN.md for why `key` lives solely on `VNode` in this crate).
    let mut node = VNode::new(Some(sel.clone()), data, children, text, None);

    if is_svg_root(&sel) {
        propagate_svg_ns(&mut node, false);
    }

    node
}

/// Attach an identity key to a VNode built by [`h`]/[`h_with`], the
/// idiomatic equivalent of setting `data.key` at construction time.
pub fn keyed<N>(mut node: VNode<N>, key: impl Into<Key>) -> VNode<N> {
    node.key = Some(key.into());
    node
}

/// `sel` begins with `svg` and is terminated by end-of-string, `.`, or `#`
/// (§4.1 "SVG propagation").
fn is_svg_root(sel: &str) -> bool {
    sel == "svg" || sel.starts_with("svg.") || sel.starts_with("svg#")
}

/// Recursively set `data.ns` to the SVG namespace on `node` and its
/// descendants, halting at (but still marking) a `foreignObject` boundary so
/// nested HTML children inherit no namespace (§4.1).
fn propagate_svg_ns<N>(node: &mut VNode<N>, parent_is_foreign_object: bool) {
    if !parent_is_foreign_object {
        match node.data.as_mut() {
            Some(data) => data.ns = Some(SVG_NS.to_owned()),
            None => node.data = Some(VNodeData::with_ns(SVG_NS)),
        }
    }

    let this_is_foreign_object = node
        .sel
        .as_deref()
        .map(|s| parse_selector(s).tag == "foreignObject")
        .unwrap_or(false);

    if let Some(kids) = node.children.as_mut() {
        for child in kids.iter_mut() {
            propagate_svg_ns(child, this_is_foreign_object);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_tag_has_no_children_or_data() {
        let v: VNode<()> = h("div", ());
        assert_eq!(v.sel.as_deref(), Some("div"));
        assert!(v.data.is_none());
        assert!(v.children.is_none());
    }

    #[test]
    fn string_second_arg_becomes_the_nodes_own_text() {
        let v: VNode<()> = h("p", "hello");
        assert_eq!(v.text.as_deref(), Some("hello"));
        assert!(v.children.is_none());
    }

    #[test]
    fn vnode_second_arg_is_wrapped_as_one_child() {
        let span: VNode<()> = h("span", ());
        let v: VNode<()> = h("div", span);
        assert_eq!(v.children.unwrap().len(), 1);
    }

    #[test]
    fn vec_second_arg_is_children_list() {
        let kids: Vec<VNode<()>> = children(["a", "b", "c"]);
        let v: VNode<()> = h("ul", kids);
        assert_eq!(v.children.unwrap().len(), 3);
    }

    #[test]
    fn null_children_are_skipped() {
        let kids: Vec<VNode<()>> = children(vec![Some(h::<()>("li", ())), None, Some(h::<()>("li", ()))]);
        assert_eq!(kids.len(), 2);
    }

    #[test]
    fn svg_namespace_propagates_to_descendants() {
        let circle: VNode<()> = h("circle", ());
        let v: VNode<()> = h("svg", circle);
        assert_eq!(v.ns(), Some(SVG_NS));
        let kids = v.children.unwrap();
        assert_eq!(kids[0].ns(), Some(SVG_NS));
    }

    #[test]
    fn foreign_object_halts_propagation() {
        let inner_div: VNode<()> = h("div", ());
        let fo: VNode<()> = h("foreignObject", inner_div);
        let v: VNode<()> = h("svg", fo);
        let fo_built = &v.children.unwrap()[0];
        assert_eq!(fo_built.ns(), Some(SVG_NS));
        let inner = &fo_built.children.as_ref().unwrap()[0];
        assert_eq!(inner.ns(), None);
    }
}
