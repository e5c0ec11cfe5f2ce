use crate::error::Result;
use crate::optimizer::attributes::is_shape;
use crate::optimizer::inherited::Inherited;
use crate::optimizer::numbers::parse_length;
use crate::types::{Document, Element, Node};

/// Remove stroke and fill attributes that paint nothing
///
/// On shape elements:
/// - when the effective stroke is absent, `none`, fully transparent or zero
///   wide, every `stroke*` attribute is removed (and `stroke="none"` is set
///   if an ancestor strokes)
/// - when the effective fill is `none` or fully transparent, every `fill-*`
///   attribute is removed and `fill="none"` is kept or set
/// - with `remove_none`, shapes that end up neither stroked nor filled are
///   removed
///
/// Shapes with an `id` are left alone since they may be reused elsewhere.
///
/// # Arguments
/// * `doc` - The document to modify
/// * `remove_none` - Remove shapes that are neither stroked nor filled
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_useless_stroke_and_fill;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><path stroke="none" stroke-width="2" d="M0 0h1"/><path fill="none" d="M1 1h1"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// remove_useless_stroke_and_fill(&mut doc, true).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0h1"/></svg>"#);
/// ```
pub fn remove_useless_stroke_and_fill(doc: &mut Document, remove_none: bool) -> Result<()> {
    let root = Inherited::default();
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        clean_children(elem, &root, remove_none);
    }
    Ok(())
}

fn clean_children(elem: &mut Element, inherited: &Inherited, remove_none: bool) {
    let inner = inherited.enter(elem);

    elem.children.retain_mut(|node| {
        let Node::Element(child) = node else {
            return true;
        };
        if !is_shape(&child.name) || child.has_attr("id") {
            return true;
        }
        let paints = clean_shape(child, &inner);
        !(remove_none && !paints)
    });

    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        clean_children(child, &inner, remove_none);
    }
}

/// Drop useless paint attributes of a shape and tell whether it still paints
fn clean_shape(elem: &mut Element, inherited: &Inherited) -> bool {
    let is_zero = |value: Option<&str>| value.and_then(parse_length) == Some(0.0);

    let stroke = inherited.computed(elem, "stroke");
    let stroked = !matches!(stroke, None | Some("none"))
        && !is_zero(inherited.computed(elem, "stroke-opacity"))
        && !is_zero(inherited.computed(elem, "stroke-width"));

    if !stroked {
        elem.attributes.retain(|(name, _)| !name.starts_with("stroke"));
        if !matches!(inherited.get("stroke"), None | Some("none")) {
            elem.set_attr("stroke", "none");
        }
    }

    let filled = inherited.computed(elem, "fill") != Some("none")
        && !is_zero(inherited.computed(elem, "fill-opacity"));

    if !filled {
        elem.attributes.retain(|(name, _)| !name.starts_with("fill-"));
        if inherited.get("fill") != Some("none") {
            elem.set_attr("fill", "none");
        }
    }

    stroked || filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    fn run(text: &str, remove_none: bool) -> String {
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        remove_useless_stroke_and_fill(&mut doc, remove_none).unwrap();
        serialize_document(&doc)
    }

    #[test]
    fn test_overrides_inherited_stroke() {
        assert_eq!(
            run(r#"<svg><g stroke="red"><path stroke-width="0" d="M0 0h1"/></g></svg>"#, true),
            r#"<svg><g stroke="red"><path d="M0 0h1" stroke="none"/></g></svg>"#
        );
    }

    #[test]
    fn test_keeps_visible_stroke() {
        let text = r#"<svg><path stroke="red" stroke-width="2" fill="none" d="M0 0h1"/></svg>"#;
        assert_eq!(run(text, true), text);
    }

    #[test]
    fn test_transparent_fill() {
        assert_eq!(
            run(r#"<svg><path fill-opacity="0" fill-rule="evenodd" stroke="red" d="M0 0h1"/></svg>"#, true),
            r#"<svg><path stroke="red" d="M0 0h1" fill="none"/></svg>"#
        );
    }

    #[test]
    fn test_invisible_shape_kept_without_remove_none() {
        assert_eq!(
            run(r#"<svg><g fill="none"><path d="M0 0h1"/></g></svg>"#, false),
            r#"<svg><g fill="none"><path d="M0 0h1"/></g></svg>"#
        );
        assert_eq!(run(r#"<svg><g fill="none"><path d="M0 0h1"/></g></svg>"#, true), r#"<svg><g fill="none"/></svg>"#);
    }

    #[test]
    fn test_shapes_with_id_untouched() {
        let text = r#"<svg><path id="a" fill="none" d="M0 0h1"/></svg>"#;
        assert_eq!(run(text, true), text);
    }
}
