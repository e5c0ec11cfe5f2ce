use crate::error::Result;
use crate::types::Document;
use std::cmp::Ordering;

/// Preferred attribute order, matched against the part of the name before the first dash
const ORDER: &[&str] = &[
    "id", "width", "height", "x", "x1", "x2", "y", "y1", "y2", "cx", "cy", "r", "fill", "stroke",
    "marker", "d", "points",
];

/// Sort attributes into a stable, readable order
///
/// Namespace declarations come first (`xmlns`, then `xmlns:*`), then other
/// prefixed names, then the rest. Within a group, names whose first dash
/// segment appears in [`ORDER`] come first in that order, and everything
/// else follows alphabetically (`fill` before `fill-rule`).
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::sort_attrs;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><path d="M0 0" fill-rule="evenodd" class="a" fill="red"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// sort_attrs(&mut doc).unwrap();
/// assert_eq!(
///     serialize_document(&doc),
///     r#"<svg><path fill="red" fill-rule="evenodd" d="M0 0" class="a"/></svg>"#
/// );
/// ```
pub fn sort_attrs(doc: &mut Document) -> Result<()> {
    doc.for_each_element_mut(&mut |elem| {
        elem.attributes.sort_by(|(a, _), (b, _)| compare_names(a, b));
    });
    Ok(())
}

fn namespace_priority(name: &str) -> u8 {
    if name == "xmlns" {
        3
    } else if name.starts_with("xmlns:") {
        2
    } else if name.contains(':') {
        1
    } else {
        0
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    let by_namespace = namespace_priority(b).cmp(&namespace_priority(a));
    if by_namespace != Ordering::Equal {
        return by_namespace;
    }

    let a_part = a.split('-').next().unwrap_or(a);
    let b_part = b.split('-').next().unwrap_or(b);
    if a_part != b_part {
        let a_index = ORDER.iter().position(|name| *name == a_part);
        let b_index = ORDER.iter().position(|name| *name == b_part);
        match (a_index, b_index) {
            (Some(a_index), Some(b_index)) => return a_index.cmp(&b_index),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }
    }

    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Element, Node};

    fn sorted_names(names: &[&str]) -> Vec<String> {
        let mut elem = Element::new("svg");
        for name in names {
            elem.set_attr(name, "1");
        }
        let mut doc = Document::new(vec![Node::Element(elem)]);
        sort_attrs(&mut doc).unwrap();
        doc.root_element()
            .unwrap()
            .attributes
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    #[test]
    fn test_namespaces_first() {
        assert_eq!(
            sorted_names(&["viewBox", "xlink:href", "xmlns:xlink", "xmlns"]),
            vec!["xmlns", "xmlns:xlink", "xlink:href", "viewBox"]
        );
    }

    #[test]
    fn test_known_order_then_alphabetical() {
        assert_eq!(
            sorted_names(&["stroke-width", "opacity", "d", "stroke", "height", "clip-rule", "id"]),
            vec!["id", "height", "stroke", "stroke-width", "d", "clip-rule", "opacity"]
        );
    }

    #[test]
    fn test_marker_group() {
        assert_eq!(
            sorted_names(&["d", "marker-end", "marker-start", "fill"]),
            vec!["fill", "marker-end", "marker-start", "d"]
        );
    }
}
