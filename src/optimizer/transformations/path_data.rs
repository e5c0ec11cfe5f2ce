use crate::error::Result;
use crate::optimizer::inherited::Inherited;
use crate::optimizer::path::{parse_path, write_path};
use crate::types::{Document, Element, Node};

/// Rewrite every `d` attribute as the shortest equivalent path data
///
/// Coordinates are rounded to `precision` fractional digits. Each segment
/// is written absolute or relative, whichever is shorter, axis-aligned
/// lines become `h` / `v`, repeated command letters and redundant
/// separators are omitted. Zero-length segments are dropped unless the
/// effective `stroke-linecap` is `round` or `square`, since those caps
/// paint a dot for them. Malformed path data is left as it is.
///
/// # Arguments
/// * `doc` - The document to modify
/// * `precision` - Number of fractional digits to keep
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::convert_path_data;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><path d="M 10.00001 20 L 10 14 L 14.5 14"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// convert_path_data(&mut doc, 4).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M10 20v-6h4.5"/></svg>"#);
/// ```
pub fn convert_path_data(doc: &mut Document, precision: u8) -> Result<()> {
    let root = Inherited::default();
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        convert_element(elem, &root, precision);
    }
    Ok(())
}

fn convert_element(elem: &mut Element, inherited: &Inherited, precision: u8) {
    if elem.name == "path" {
        let keep_zero_length = matches!(
            inherited.computed(elem, "stroke-linecap"),
            Some("round" | "square")
        );
        let rewritten = elem
            .attr("d")
            .and_then(parse_path)
            .filter(|segments| !segments.is_empty())
            .map(|segments| write_path(&segments, precision, keep_zero_length));
        if let Some(d) = rewritten {
            elem.set_attr("d", &d);
        }
    }

    let inner = inherited.enter(elem);
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        convert_element(child, &inner, precision);
    }
}
