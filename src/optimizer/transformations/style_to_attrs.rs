use crate::error::Result;
use crate::optimizer::attributes::is_presentation;
use crate::types::{Document, Element, Node};

/// Convert `style` declarations into presentation attributes
///
/// Each `property: value` declaration whose property is a presentation
/// attribute is moved onto the element, overriding an attribute of the
/// same name (inline style wins over attributes). Declarations marked
/// `!important`, unknown properties and `transform` (CSS syntax differs
/// from the attribute) stay in `style`; the attribute is removed once it
/// is empty.
///
/// # Arguments
/// * `doc` - The document to modify
///
/// # Returns
/// * `Ok(())` - Successfully converted all style attributes
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::convert_style_to_attrs;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><path style="fill:red; stroke : none" d="M0 0"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// convert_style_to_attrs(&mut doc).unwrap();
/// assert_eq!(
///     serialize_document(&doc),
///     r#"<svg><path d="M0 0" fill="red" stroke="none"/></svg>"#
/// );
/// ```
pub fn convert_style_to_attrs(doc: &mut Document) -> Result<()> {
    doc.for_each_element_mut(&mut convert_element);
    Ok(())
}

fn convert_element(elem: &mut Element) {
    let Some(style) = elem.remove_attr("style") else {
        return;
    };

    let mut remaining = Vec::new();
    for (property, value) in parse_declarations(&style) {
        if is_presentation(&property) && property != "transform" && !value.contains("!important") {
            elem.set_attr(&property, &value);
        } else {
            remaining.push(format!("{property}:{value}"));
        }
    }

    if !remaining.is_empty() {
        elem.set_attr("style", &remaining.join(";"));
    }
}

/// Split a style attribute into `(property, value)` pairs
///
/// Comments are dropped, property names are lowercased, declarations
/// without a colon or with an empty value are ignored.
fn parse_declarations(style: &str) -> Vec<(String, String)> {
    let mut text = String::with_capacity(style.len());
    let mut rest = style;
    while let Some(start) = rest.find("/*") {
        text.push_str(&rest[..start]);
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    text.push_str(rest);

    text.split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some((property, value.to_string()))
        })
        .collect()
}

/// Remove `<style>` and `<script>` elements and event handler attributes
///
/// The generated component carries neither stylesheets nor scripts, so
/// anything relying on them is dropped with them.
pub fn remove_style_elements(doc: &mut Document) -> Result<()> {
    remove_from_nodes(&mut doc.children);
    Ok(())
}

fn remove_from_nodes(nodes: &mut Vec<Node>) {
    nodes.retain(|node| !(node.is_element_named("style") || node.is_element_named("script")));

    for elem in nodes.iter_mut().filter_map(Node::as_element_mut) {
        elem.attributes.retain(|(name, _)| !name.starts_with("on"));
        remove_from_nodes(&mut elem.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let declarations = parse_declarations("fill: #FFF ; /* note */ Stroke:none;;opacity:");
        assert_eq!(
            declarations,
            vec![
                ("fill".to_string(), "#FFF".to_string()),
                ("stroke".to_string(), "none".to_string()),
            ]
        );
    }

    #[test]
    fn test_style_overrides_attribute() {
        let mut elem = Element::new("path")
            .with_attr("fill", "blue")
            .with_attr("style", "fill:red");
        convert_element(&mut elem);

        assert_eq!(elem.attr("fill"), Some("red"));
        assert!(!elem.has_attr("style"));
    }

    #[test]
    fn test_keeps_unknown_and_important() {
        let mut elem = Element::new("path")
            .with_attr("style", "mix-blend-mode:multiply;fill:red !important;stroke:blue");
        convert_element(&mut elem);

        assert_eq!(elem.attr("stroke"), Some("blue"));
        assert!(!elem.has_attr("fill"));
        assert_eq!(
            elem.attr("style"),
            Some("mix-blend-mode:multiply;fill:red !important")
        );
    }

    #[test]
    fn test_remove_style_and_script_elements() {
        let mut doc = Document::new(vec![Node::Element(
            Element::new("svg")
                .with_attr("onload", "init()")
                .with_child(Node::Element(Element::new("style")))
                .with_child(Node::Element(
                    Element::new("g").with_child(Node::Element(Element::new("script"))),
                ))
                .with_child(Node::Element(Element::new("path"))),
        )]);

        remove_style_elements(&mut doc).unwrap();

        let svg = doc.root_element().unwrap();
        assert!(!svg.has_attr("onload"));
        let names: Vec<&str> = svg.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["g", "path"]);
        assert!(svg.child_elements().next().unwrap().children.is_empty());
    }
}
