use crate::error::Result;
use crate::optimizer::attributes::url_reference;
use crate::optimizer::inherited::Inherited;
use crate::optimizer::matrix::{format_transform, is_identity, parse_transform};
use crate::optimizer::path::{apply_matrix, parse_path, write_path};
use crate::types::{Document, Element, Node};
use kurbo::Affine;

/// Attributes whose rendering depends on the untransformed coordinate system
const COORDINATE_BOUND_ATTRS: &[&str] = &["clip-path", "mask", "filter", "marker-start", "marker-mid", "marker-end"];

/// Canonicalize `transform` attributes
///
/// Each transform list is multiplied into one matrix and written back as
/// the shortest equivalent list. Identity transforms are removed. When the
/// element is an unstroked `path` and the matrix only translates and
/// scales, the matrix is applied to the path data directly and the
/// attribute disappears.
///
/// Transform lists that cannot be parsed are left as they are.
///
/// # Arguments
/// * `doc` - The document to modify
/// * `precision` - Number of fractional digits for translations and path data
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::convert_transforms;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><path transform="translate(2, 0) translate(1 1)" d="M0 0h2"/><g transform="scale(1)"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// convert_transforms(&mut doc, 4).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M3 1h2"/><g/></svg>"#);
/// ```
pub fn convert_transforms(doc: &mut Document, precision: u8) -> Result<()> {
    let root = Inherited::default();
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        convert_element(elem, &root, precision);
    }
    Ok(())
}

fn convert_element(elem: &mut Element, inherited: &Inherited, precision: u8) {
    if let Some(matrix) = elem.attr("transform").and_then(parse_transform) {
        if is_identity(&matrix, precision) {
            elem.remove_attr("transform");
        } else if let Some(d) = apply_to_path(elem, inherited, &matrix, precision) {
            elem.set_attr("d", &d);
            elem.remove_attr("transform");
        } else {
            elem.set_attr("transform", &format_transform(&matrix, precision));
        }
    }

    let inner = inherited.enter(elem);
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        convert_element(child, &inner, precision);
    }
}

/// Transformed path data, when the transform can be folded into it
fn apply_to_path(elem: &Element, inherited: &Inherited, matrix: &Affine, precision: u8) -> Option<String> {
    if elem.name != "path" || elem.has_attr("id") {
        return None;
    }
    if COORDINATE_BOUND_ATTRS.iter().any(|name| elem.has_attr(name)) {
        return None;
    }
    if !matches!(inherited.computed(elem, "stroke"), None | Some("none")) {
        return None;
    }
    // Gradients and patterns are laid out in the element's user space
    if inherited
        .computed(elem, "fill")
        .is_some_and(|fill| url_reference(fill).is_some())
    {
        return None;
    }

    let segments = parse_path(elem.attr("d")?)?;
    let transformed = apply_matrix(&segments, matrix)?;
    Some(write_path(&transformed, precision, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    fn run(text: &str) -> String {
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        convert_transforms(&mut doc, 4).unwrap();
        serialize_document(&doc)
    }

    #[test]
    fn test_shortens_group_transform() {
        assert_eq!(
            run(r#"<svg><g transform="matrix(1 0 0 1 4 0)"><path d="M0 0"/></g></svg>"#),
            r#"<svg><g transform="translate(4)"><path d="M0 0"/></g></svg>"#
        );
    }

    #[test]
    fn test_applies_scale_to_unstroked_path() {
        assert_eq!(
            run(r#"<svg><path transform="scale(2)" d="M1 1h1v1z"/></svg>"#),
            r#"<svg><path d="M2 2h2v2z"/></svg>"#
        );
    }

    #[test]
    fn test_keeps_transform_on_stroked_path() {
        assert_eq!(
            run(r#"<svg><g stroke="red"><path transform="scale(2 2)" d="M1 1h1"/></g></svg>"#),
            r#"<svg><g stroke="red"><path transform="scale(2)" d="M1 1h1"/></g></svg>"#
        );
    }

    #[test]
    fn test_keeps_rotation_as_attribute() {
        assert_eq!(
            run(r#"<svg><path transform="rotate(45, 0, 0)" d="M1 1h1"/></svg>"#),
            r#"<svg><path transform="rotate(45)" d="M1 1h1"/></svg>"#
        );
    }

    #[test]
    fn test_rotation_keeps_exact_angle_and_center() {
        assert_eq!(
            run(r#"<svg><g transform="rotate(30)"/><g transform="rotate(30 12 12)"/></svg>"#),
            r#"<svg><g transform="rotate(30)"/><g transform="rotate(30 12 12)"/></svg>"#
        );
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let text = r#"<svg><g transform="translate(1 1) rotate(90)"><path transform="translate(2) scale(0.5)" d="M1 1h1"/></g><g transform="matrix(1 0 1 1 0 0)"/></svg>"#;
        let once = run(text);
        assert_eq!(run(&once), once);
    }

    #[test]
    fn test_unparseable_transform_untouched() {
        let text = r#"<svg><g transform="perspective(3)"/></svg>"#;
        assert_eq!(run(text), text);
    }
}
