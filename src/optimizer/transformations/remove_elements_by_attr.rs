use crate::error::Result;
use crate::types::{Document, Element, Node};

/// Remove elements, with their subtree, by `id` or by class
///
/// An element is removed when its `id` is one of `ids`, or when one of its
/// classes is one of `classes`. With both lists empty, which is the icon
/// preset, the document is left unchanged.
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_elements_by_attr;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><rect id="bg"/><path class="guide grid"/><path d="M0 0"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// remove_elements_by_attr(&mut doc, &["bg".to_string()], &["grid".to_string()]).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0"/></svg>"#);
/// ```
pub fn remove_elements_by_attr(doc: &mut Document, ids: &[String], classes: &[String]) -> Result<()> {
    if ids.is_empty() && classes.is_empty() {
        return Ok(());
    }

    let matches = |elem: &Element| {
        elem.attr("id").is_some_and(|id| ids.iter().any(|target| target == id))
            || elem.attr("class").is_some_and(|class| {
                class
                    .split_whitespace()
                    .any(|name| classes.iter().any(|target| target == name))
            })
    };

    doc.children
        .retain(|node| !node.as_element().is_some_and(|elem| matches(elem)));
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        remove_matching(elem, &matches);
    }
    Ok(())
}

fn remove_matching(elem: &mut Element, matches: &dyn Fn(&Element) -> bool) {
    elem.children
        .retain(|node| !node.as_element().is_some_and(matches));
    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        remove_matching(child, matches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    #[test]
    fn test_empty_targets_keep_everything() {
        let text = r#"<svg><rect id="bg"/></svg>"#;
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        remove_elements_by_attr(&mut doc, &[], &[]).unwrap();
        assert_eq!(serialize_document(&doc), text);
    }

    #[test]
    fn test_removes_nested_subtree() {
        let mut doc = parse_document(
            r#"<svg><g><g id="layer"><path d="M0 0"/></g><path d="M1 1"/></g></svg>"#,
            Stage::Optimize,
        )
        .unwrap();
        remove_elements_by_attr(&mut doc, &["layer".to_string()], &[]).unwrap();
        assert_eq!(serialize_document(&doc), r#"<svg><g><path d="M1 1"/></g></svg>"#);
    }
}
