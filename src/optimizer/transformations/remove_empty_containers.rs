use crate::error::Result;
use crate::optimizer::attributes::is_container;
use crate::types::{Document, Element, Node};

/// Remove container elements left without children
///
/// Children are emptied before their parents, so nested empty groups go
/// away in one pass. Kept even when empty:
/// - the root `svg`
/// - `mask` and `clipPath` with an `id`, since a reference to a missing
///   one hides the referencing element
/// - `pattern` with attributes, which may inherit content through `href`
/// - `g` with a `filter`, which can paint a region by itself
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_empty_containers;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><g><g/><defs/></g><path d="M0 0"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// remove_empty_containers(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0"/></svg>"#);
/// ```
pub fn remove_empty_containers(doc: &mut Document) -> Result<()> {
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        remove_empty_children(elem);
    }
    Ok(())
}

fn remove_empty_children(elem: &mut Element) {
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        remove_empty_children(child);
    }
    elem.children
        .retain(|node| !node.as_element().is_some_and(is_removable));
}

fn is_removable(elem: &Element) -> bool {
    if !is_container(&elem.name) || !elem.children.is_empty() {
        return false;
    }
    match elem.name.as_str() {
        "mask" | "clipPath" => !elem.has_attr("id"),
        "pattern" => elem.attributes.is_empty(),
        "g" => !elem.has_attr("filter"),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    fn run(text: &str) -> String {
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        remove_empty_containers(&mut doc).unwrap();
        serialize_document(&doc)
    }

    #[test]
    fn test_empty_root_is_kept() {
        assert_eq!(run("<svg><g/></svg>"), "<svg/>");
    }

    #[test]
    fn test_referenced_definitions_are_kept() {
        let text = r##"<svg><mask id="m"/><clipPath id="c"/><pattern href="#p"/><g filter="url(#f)"/><mask/></svg>"##;
        assert_eq!(
            run(text),
            r##"<svg><mask id="m"/><clipPath id="c"/><pattern href="#p"/><g filter="url(#f)"/></svg>"##
        );
    }

    #[test]
    fn test_non_containers_are_kept() {
        let text = r#"<svg><path d="M0 0"/><text/></svg>"#;
        assert_eq!(run(text), text);
    }
}
