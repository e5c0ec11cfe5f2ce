use crate::error::Result;
use crate::optimizer::inherited::Inherited;
use crate::optimizer::path::{bounding_box, parse_path, write_path, Segment};
use crate::types::{Document, Element, Node};

/// Attributes that prevent a path from being merged with its neighbours
const UNMERGEABLE_ATTRS: &[&str] = &[
    "clip-path",
    "filter",
    "id",
    "marker-end",
    "marker-mid",
    "marker-start",
    "mask",
    "style",
    "transform",
];

type BBox = (f64, f64, f64, f64);

/// Merge adjacent `path` siblings that render the same as a single path
///
/// Two consecutive paths are merged when neither has children, their
/// attributes other than `d` are identical, none of the attributes in
/// [`UNMERGEABLE_ATTRS`] is present, and their bounding boxes do not
/// overlap. The last condition keeps fill-rule and stroke overlap results
/// unchanged. Zero-length segments survive the merge when the effective
/// `stroke-linecap` is `round` or `square`.
///
/// # Arguments
/// * `doc` - The document to modify
/// * `precision` - Number of fractional digits for the merged path data
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::merge_paths;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><path d="M0 0h2v2H0z"/><path d="M5 5h2v2H5z"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// merge_paths(&mut doc, 4).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0h2v2H0zm5 5h2v2H5z"/></svg>"#);
/// ```
pub fn merge_paths(doc: &mut Document, precision: u8) -> Result<()> {
    let root = Inherited::default();
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        merge_children(elem, &root, precision);
    }
    Ok(())
}

fn merge_children(elem: &mut Element, inherited: &Inherited, precision: u8) {
    let inner = inherited.enter(elem);
    let children = std::mem::take(&mut elem.children);
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    // Parsed geometry of the last pushed node, when it is a mergeable path
    let mut previous: Option<(Vec<Segment>, BBox)> = None;

    for node in children {
        let candidate = match &node {
            Node::Element(child) => mergeable_geometry(child),
            Node::Text(_) => None,
        };

        let Some((segments, bbox)) = candidate else {
            merged.push(node);
            previous = None;
            continue;
        };

        let target = match (&mut previous, merged.last_mut()) {
            (Some((prev_segments, prev_bbox)), Some(Node::Element(prev)))
                if same_attributes(prev, &node) && !overlaps(prev_bbox, &bbox) =>
            {
                Some((prev, prev_segments, prev_bbox))
            }
            _ => None,
        };

        match target {
            Some((prev, prev_segments, prev_bbox)) => {
                prev_segments.extend(segments);
                *prev_bbox = union(prev_bbox, &bbox);
                let keep_zero_length = matches!(
                    inner.computed(prev, "stroke-linecap"),
                    Some("round" | "square")
                );
                let d = write_path(prev_segments, precision, keep_zero_length);
                prev.set_attr("d", &d);
            }
            None => {
                merged.push(node);
                previous = Some((segments, bbox));
            }
        }
    }

    elem.children = merged;
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        merge_children(child, &inner, precision);
    }
}

/// Parsed path data and bounding box of a path that may take part in a merge
fn mergeable_geometry(elem: &Element) -> Option<(Vec<Segment>, BBox)> {
    if elem.name != "path" || !elem.children.is_empty() {
        return None;
    }
    if UNMERGEABLE_ATTRS.iter().any(|name| elem.has_attr(name)) {
        return None;
    }
    let segments = parse_path(elem.attr("d")?)?;
    let bbox = bounding_box(&segments)?;
    Some((segments, bbox))
}

/// Check if two paths carry the same attributes, ignoring `d` and order
fn same_attributes(prev: &Element, node: &Node) -> bool {
    let Node::Element(next) = node else {
        return false;
    };
    let others = |elem: &Element| elem.attributes.iter().filter(|(name, _)| name != "d").count();
    others(prev) == others(next)
        && prev
            .attributes
            .iter()
            .filter(|(name, _)| name != "d")
            .all(|(name, value)| next.attr(name) == Some(value.as_str()))
}

fn overlaps(a: &BBox, b: &BBox) -> bool {
    a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3
}

fn union(a: &BBox, b: &BBox) -> BBox {
    (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))
}
