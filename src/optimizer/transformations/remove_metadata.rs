use crate::error::Result;
use crate::optimizer::attributes::{EDITOR_NAMESPACES, METADATA_ELEMENTS};
use crate::types::{Document, Element, Node};
use std::collections::HashSet;

/// Prefixes conventionally bound to editor namespaces, removed even when
/// the export forgot to declare them
const EDITOR_PREFIXES: &[&str] = &["sodipodi", "inkscape", "sketch", "figma", "serif"];

/// Remove non-rendering metadata from the document
///
/// Removes:
/// - `title`, `desc` and `metadata` elements
/// - elements and attributes in editor namespaces (Inkscape, Sketch,
///   Illustrator, Figma...) together with their `xmlns:*` declarations
/// - namespace declarations whose prefix is not used by any element or
///   attribute name
///
/// Comments, processing instructions and the doctype never reach the tree
/// (see [`crate::parser::parse_document`]).
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_metadata;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     "<svg><title>Home</title><desc>icon</desc><path d=\"M0 0\"/></svg>",
///     Stage::Optimize,
/// ).unwrap();
/// remove_metadata(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0"/></svg>"#);
/// ```
pub fn remove_metadata(doc: &mut Document) -> Result<()> {
    let mut editor_prefixes: HashSet<String> =
        EDITOR_PREFIXES.iter().map(|p| p.to_string()).collect();
    doc.for_each_element(&mut |elem| {
        for (name, value) in &elem.attributes {
            if let Some(prefix) = name.strip_prefix("xmlns:") {
                if EDITOR_NAMESPACES.contains(&value.as_str()) {
                    editor_prefixes.insert(prefix.to_string());
                }
            }
        }
    });

    remove_from_nodes(&mut doc.children, &editor_prefixes);

    let used = used_prefixes(doc);
    doc.for_each_element_mut(&mut |elem| {
        elem.attributes.retain(|(name, _)| match name.strip_prefix("xmlns:") {
            Some(prefix) => used.contains(prefix),
            None => true,
        });
    });

    Ok(())
}

/// Recursively drop metadata elements and editor-namespaced content
fn remove_from_nodes(nodes: &mut Vec<Node>, editor_prefixes: &HashSet<String>) {
    nodes.retain(|node| match node {
        Node::Element(elem) => {
            !METADATA_ELEMENTS.contains(&elem.name.as_str())
                && !has_prefix_in(&elem.name, editor_prefixes)
        }
        Node::Text(_) => true,
    });

    for elem in nodes.iter_mut().filter_map(Node::as_element_mut) {
        elem.attributes.retain(|(name, _)| match name.strip_prefix("xmlns:") {
            Some(declared) => !editor_prefixes.contains(declared),
            None => !has_prefix_in(name, editor_prefixes),
        });
        remove_from_nodes(&mut elem.children, editor_prefixes);
    }
}

/// Check if a qualified name uses one of the given prefixes
fn has_prefix_in(name: &str, prefixes: &HashSet<String>) -> bool {
    name.split_once(':')
        .is_some_and(|(prefix, _)| prefix != "xmlns" && prefixes.contains(prefix))
}

/// Collect every prefix used by an element or attribute name
fn used_prefixes(doc: &Document) -> HashSet<String> {
    let mut used = HashSet::new();
    doc.for_each_element(&mut |elem: &Element| {
        let names = std::iter::once(&elem.name).chain(elem.attributes.iter().map(|(n, _)| n));
        for name in names {
            if let Some((prefix, _)) = name.split_once(':') {
                if prefix != "xmlns" {
                    used.insert(prefix.to_string());
                }
            }
        }
    });
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    fn run(text: &str) -> String {
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        remove_metadata(&mut doc).unwrap();
        serialize_document(&doc)
    }

    #[test]
    fn test_removes_editor_namespace_content() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" sodipodi:docname="icon.svg"><sodipodi:namedview/><path d="M0 0"/></svg>"#;
        assert_eq!(
            run(text),
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0"/></svg>"#
        );
    }

    #[test]
    fn test_removes_metadata_elements() {
        let text = "<svg><metadata><rdf/></metadata><g><title>x</title><path d=\"M0 0\"/></g></svg>";
        assert_eq!(run(text), r#"<svg><g><path d="M0 0"/></g></svg>"#);
    }

    #[test]
    fn test_removes_unused_namespace() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><path d="M0 0"/></svg>"#;
        assert_eq!(
            run(text),
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0"/></svg>"#
        );
    }

    #[test]
    fn test_keeps_used_namespace() {
        let text = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a"/></svg>"##;
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        remove_metadata(&mut doc).unwrap();

        let svg = doc.root_element().unwrap();
        assert!(svg.has_attr("xmlns:xlink"));
        assert_eq!(
            svg.child_elements().next().unwrap().attr("xlink:href"),
            Some("#a")
        );
    }
}
