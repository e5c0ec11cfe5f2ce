use crate::error::Result;
use crate::optimizer::attributes::{
    is_inheritable, is_zero_default_geometry, presentation_default, referenced_ids,
    USELESS_ROOT_ATTRS,
};
use crate::optimizer::inherited::Inherited;
use crate::optimizer::numbers::parse_length;
use crate::types::{Document, Element, Node};
use std::collections::HashSet;

/// Element specific defaults that are not presentation attributes
const ELEMENT_DEFAULTS: &[(&str, &str, &str)] = &[
    ("svg", "preserveAspectRatio", "xMidYMid meet"),
    ("svg", "width", "100%"),
    ("svg", "height", "100%"),
    ("clipPath", "clipPathUnits", "userSpaceOnUse"),
    ("mask", "maskContentUnits", "userSpaceOnUse"),
    ("linearGradient", "gradientUnits", "objectBoundingBox"),
    ("radialGradient", "gradientUnits", "objectBoundingBox"),
];

/// Remove attributes that restate the default
///
/// - presentation attributes equal to their initial value, when no ancestor
///   sets the property to something else
/// - geometry attributes equal to zero where zero is the initial value
///   (`x="0"` on a `rect`, `cx="0"` on a `circle`...)
/// - attributes that mean nothing on the root `svg` of an inline icon
///   (`version`, `baseProfile`, `xml:space`, `x`, `y`)
/// - `id` attributes nothing refers to, unless the document has `style`
///   or `script` elements that might use them
///
/// Elements with an `id` keep their defaults: they may be instantiated by
/// `use` in a context that sets other values.
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_defaults;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg version="1.1"><path id="a" d="M0 0"/><rect x="0" y="1" fill-rule="nonzero"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// remove_defaults(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0"/><rect y="1"/></svg>"#);
/// ```
pub fn remove_defaults(doc: &mut Document) -> Result<()> {
    let mut has_scripting = false;
    doc.for_each_element(&mut |elem| {
        has_scripting |= elem.name == "style" || elem.name == "script";
    });
    let referenced = (!has_scripting).then(|| referenced_ids(doc));

    let root = Inherited::default();
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        for name in USELESS_ROOT_ATTRS {
            elem.remove_attr(name);
        }
        remove_element_defaults(elem, &root, referenced.as_ref());
    }
    Ok(())
}

fn remove_element_defaults(
    elem: &mut Element,
    inherited: &Inherited,
    referenced: Option<&HashSet<String>>,
) {
    if let (Some(ids), Some(id)) = (referenced, elem.attr("id")) {
        if !ids.contains(id) {
            elem.remove_attr("id");
        }
    }

    if !elem.has_attr("id") {
        let name = elem.name.clone();
        elem.attributes
            .retain(|(attr, value)| !is_default(&name, attr, value, inherited));
    }

    let inner = inherited.enter(elem);
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        remove_element_defaults(child, &inner, referenced);
    }
}

fn is_default(element: &str, attr: &str, value: &str, inherited: &Inherited) -> bool {
    if let Some(default) = presentation_default(attr) {
        if value == default {
            // An inherited non-default value would show through
            return !is_inheritable(attr) || inherited.get(attr).is_none_or(|v| v == default);
        }
    }

    if is_zero_default_geometry(element, attr) {
        return parse_length(value) == Some(0.0);
    }

    ELEMENT_DEFAULTS
        .iter()
        .any(|(elem, name, default)| *elem == element && *name == attr && *default == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    fn run(text: &str) -> String {
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        remove_defaults(&mut doc).unwrap();
        serialize_document(&doc)
    }

    #[test]
    fn test_inherited_value_keeps_default() {
        assert_eq!(
            run(r#"<svg><g stroke="red"><path stroke="none" stroke-width="1" d="M0 0"/></g></svg>"#),
            r#"<svg><g stroke="red"><path stroke="none" d="M0 0"/></g></svg>"#
        );
    }

    #[test]
    fn test_root_attributes() {
        assert_eq!(
            run(r#"<svg xml:space="preserve" x="0px" y="0px" baseProfile="tiny" preserveAspectRatio="xMidYMid meet" viewBox="0 0 24 24"/>"#),
            r#"<svg viewBox="0 0 24 24"/>"#
        );
    }

    #[test]
    fn test_referenced_ids_are_kept() {
        assert_eq!(
            run(r#"<svg><clipPath id="c" clipPathUnits="userSpaceOnUse"><path d="M0 0"/></clipPath><g id="unused" clip-path="url(#c)"/></svg>"#),
            r#"<svg><clipPath id="c" clipPathUnits="userSpaceOnUse"><path d="M0 0"/></clipPath><g clip-path="url(#c)"/></svg>"#
        );
    }

    #[test]
    fn test_ids_kept_with_style_element() {
        let text = r#"<svg><style>#a{fill:red}</style><path id="a" d="M0 0"/></svg>"#;
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_zero_geometry() {
        assert_eq!(
            run(r#"<svg><circle cx="0" cy="2" r="0"/><line x1="0" x2="1"/></svg>"#),
            r#"<svg><circle cy="2" r="0"/><line x2="1"/></svg>"#
        );
    }
}
