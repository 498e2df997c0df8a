//! Parsing for the compact `tag#id.class1.class2` selector grammar (§6 of the spec).

/// The SVG namespace URI. Propagated onto every descendant of an `svg`-rooted
/// subtree by the hyperscript builder, except across a `foreignObject` boundary.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// The XLink namespace, commonly needed alongside [`SVG_NS`] for attributes
/// like `xlink:href` on `<use>`/`<image>` elements. Not exercised by the core
/// itself; exposed for modules that need it.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// The tag, optional id, and class tokens extracted from a selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedSelector<'a> {
    pub tag: &'a str,
    pub id: Option<&'a str>,
    pub classes: Vec<&'a str>,
}

/// Parse a selector of the form `tag ('#' id)? ('.' class)*`.
///
/// Tag defaults to the whole string when neither `#` nor `.` appears. An id is
/// only recognized when a `#` occurs before the first `.`; everything after
/// the first `.` is split into space-separated class tokens, empty tokens
/// dropped.
pub fn parse_selector(sel: &str) -> ParsedSelector<'_> {
    let hash_pos = sel.find('#');
    let dot_pos = sel.find('.');

    let tag_end = match (hash_pos, dot_pos) {
        (Some(h), Some(d)) => h.min(d),
        (Some(h), None) => h,
        (None, Some(d)) => d,
        (None, None) => sel.len(),
    };
    let tag = &sel[..tag_end];

    let id = match (hash_pos, dot_pos) {
        (Some(h), Some(d)) if h < d => Some(&sel[h + 1..d]),
        (Some(h), None) => Some(&sel[h + 1..]),
        _ => None,
    };

    let classes = match dot_pos {
        Some(d) => sel[d + 1..]
            .split('.')
            .filter(|token| !token.is_empty())
            .collect(),
        None => Vec::new(),
    };

    ParsedSelector { tag, id, classes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_tag() {
        let p = parse_selector("div");
        assert_eq!(p.tag, "div");
        assert_eq!(p.id, None);
        assert!(p.classes.is_empty());
    }

    #[test]
    fn tag_id_and_classes() {
        let p = parse_selector("div#app.container.dark");
        assert_eq!(p.tag, "div");
        assert_eq!(p.id, Some("app"));
        assert_eq!(p.classes, vec!["container", "dark"]);
    }

    #[test]
    fn tag_and_classes_only() {
        let p = parse_selector("span.a.b");
        assert_eq!(p.tag, "span");
        assert_eq!(p.id, None);
        assert_eq!(p.classes, vec!["a", "b"]);
    }

    #[test]
    fn id_without_classes() {
        let p = parse_selector("ul#list");
        assert_eq!(p.tag, "ul");
        assert_eq!(p.id, Some("list"));
        assert!(p.classes.is_empty());
    }

    #[test]
    fn comment_and_empty_selectors_pass_through() {
        let p = parse_selector("!");
        assert_eq!(p.tag, "!");
        let p = parse_selector("");
        assert_eq!(p.tag, "");
    }
}
