use crate::error::{IconError, Result, Stage};
use crate::types::{Document, Element, Node};
use roxmltree::{NodeType, ParsingOptions};

/// SVG namespace, elements in it are stored by local name
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// XLink namespace, attributes in it are stored as `xlink:<name>`
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Implicit XML namespace, attributes in it are stored as `xml:<name>`
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Name of the wrapper used to parse markup with several top-level nodes
const FRAGMENT_WRAPPER: &str = "fig2icon-fragment";

/// Parse SVG text into a document tree
///
/// Comments, processing instructions and the document type declaration are
/// not part of the tree. Namespace declarations are kept as `xmlns` /
/// `xmlns:<prefix>` attributes on the element that declares them, so that
/// unused ones can be dropped by the optimizer.
///
/// Markup with several top-level elements, or with text next to the root
/// element, is not a well-formed XML document but is still accepted: the
/// top-level nodes all end up in [`Document::children`], and it is up to
/// the caller to reject that shape.
///
/// # Arguments
/// * `text` - Decoded SVG markup
/// * `stage` - Pipeline stage reported when parsing fails
///
/// # Returns
/// * `Ok(Document)` - The owned document tree
/// * `Err(IconError::Parse)` - If the markup is not well-formed
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::parser::parse_document;
///
/// let doc = parse_document("<svg><path d=\"M0 0\"/></svg>", Stage::Optimize).unwrap();
/// assert_eq!(doc.root_element().unwrap().name, "svg");
/// ```
pub fn parse_document(text: &str, stage: Stage) -> Result<Document> {
    let xml = match roxmltree::Document::parse_with_options(text, parsing_options()) {
        Ok(xml) => xml,
        Err(source) => return parse_fragment(text).ok_or(IconError::Parse { stage, source }),
    };

    let children = xml.root().children().filter_map(convert_node).collect();
    Ok(Document::new(children))
}

/// Exported icons often carry a DOCTYPE, which roxmltree rejects by default
fn parsing_options() -> ParsingOptions {
    ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    }
}

/// Parse markup with several top-level nodes by wrapping it in an element
///
/// Returns `None` if the wrapped markup does not parse either, or if it
/// turns out to have a single top-level node (then the original error is
/// the meaningful one).
fn parse_fragment(text: &str) -> Option<Document> {
    let wrapped = format!(
        "<{wrapper}>{body}</{wrapper}>",
        wrapper = FRAGMENT_WRAPPER,
        body = skip_prolog(text)
    );
    let xml = roxmltree::Document::parse_with_options(&wrapped, parsing_options()).ok()?;

    let children: Vec<Node> = xml
        .root_element()
        .children()
        .filter_map(convert_node)
        .filter(|node| !matches!(node, Node::Text(text) if text.trim().is_empty()))
        .collect();
    (children.len() > 1).then(|| Document::new(children))
}

/// Skip the XML declaration, comments, processing instructions and the
/// document type declaration at the start of the markup
fn skip_prolog(text: &str) -> &str {
    let mut rest = text.trim_start();
    loop {
        let end = if rest.starts_with("<?") {
            rest.find("?>").map(|i| i + 2)
        } else if rest.starts_with("<!--") {
            rest.find("-->").map(|i| i + 3)
        } else if rest.starts_with("<!DOCTYPE") {
            doctype_end(rest)
        } else {
            None
        };
        match end {
            Some(end) => rest = rest[end..].trim_start(),
            None => return rest,
        }
    }
}

/// Length of a document type declaration, internal subset included
fn doctype_end(text: &str) -> Option<usize> {
    let close = text.find('>')?;
    match text.find('[') {
        Some(open) if open < close => text[open..].find("]>").map(|i| open + i + 2),
        _ => Some(close + 1),
    }
}

/// Convert a roxmltree node into an owned node, skipping non-content nodes
fn convert_node(node: roxmltree::Node<'_, '_>) -> Option<Node> {
    match node.node_type() {
        NodeType::Element => Some(Node::Element(convert_element(node))),
        NodeType::Text => node.text().map(|text| Node::Text(text.to_string())),
        NodeType::Root | NodeType::Comment | NodeType::PI => None,
    }
}

fn convert_element(node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let mut elem = Element::new(qualified_name(node, tag.namespace(), tag.name(), true));

    for (prefix, uri) in declared_namespaces(node) {
        match prefix {
            Some(prefix) => elem.set_attr(&format!("xmlns:{prefix}"), &uri),
            None => elem.set_attr("xmlns", &uri),
        }
    }

    for attr in node.attributes() {
        let name = qualified_name(node, attr.namespace(), attr.name(), false);
        elem.set_attr(&name, attr.value());
    }

    elem.children = node.children().filter_map(convert_node).collect();
    elem
}

/// Build the prefixed name of an element or attribute
///
/// Elements in the SVG namespace (or none) and unqualified attributes keep
/// their local name; everything else gets the prefix bound in scope.
fn qualified_name(
    node: roxmltree::Node<'_, '_>,
    namespace: Option<&str>,
    local: &str,
    is_element: bool,
) -> String {
    let Some(uri) = namespace else {
        return local.to_string();
    };

    if is_element && uri == SVG_NS {
        return local.to_string();
    }

    let prefix = match uri {
        XLINK_NS => Some("xlink"),
        XML_NS => Some("xml"),
        _ => node.lookup_prefix(uri),
    };

    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

/// Namespaces declared on this element rather than inherited from its parent
fn declared_namespaces(node: roxmltree::Node<'_, '_>) -> Vec<(Option<String>, String)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| (ns.name().map(str::to_string), ns.uri().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let doc = parse_document(r#"<svg><path fill="red" d="M0 0"/></svg>"#, Stage::Optimize)
            .unwrap();

        let svg = doc.root_element().unwrap();
        assert_eq!(svg.name, "svg");

        let path = svg.child_elements().next().unwrap();
        assert_eq!(path.name, "path");
        assert_eq!(path.attr("fill"), Some("red"));
        assert_eq!(path.attr("d"), Some("M0 0"));
    }

    #[test]
    fn test_parse_drops_comments_and_doctype() {
        let text = r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- Generator: exporter -->
<svg><!-- inner --><g/></svg>"#;
        let doc = parse_document(text, Stage::Optimize).unwrap();

        assert_eq!(doc.children.len(), 1);
        let svg = doc.root_element().unwrap();
        assert_eq!(svg.children.len(), 1);
        assert!(svg.children[0].is_element_named("g"));
    }

    #[test]
    fn test_parse_namespaces() {
        let text = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a"/></svg>"##;
        let doc = parse_document(text, Stage::Optimize).unwrap();

        let svg = doc.root_element().unwrap();
        assert_eq!(svg.attr("xmlns"), Some(SVG_NS));
        assert_eq!(svg.attr("xmlns:xlink"), Some(XLINK_NS));

        let use_elem = svg.child_elements().next().unwrap();
        assert_eq!(use_elem.name, "use");
        assert_eq!(use_elem.attr("xlink:href"), Some("#a"));
        assert!(!use_elem.has_attr("xmlns"));
    }

    #[test]
    fn test_parse_editor_namespace_element() {
        let text = r#"<svg xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"><sodipodi:namedview sodipodi:docname="x"/></svg>"#;
        let doc = parse_document(text, Stage::Optimize).unwrap();

        let view = doc.root_element().unwrap().child_elements().next().unwrap();
        assert_eq!(view.name, "sodipodi:namedview");
        assert_eq!(view.attr("sodipodi:docname"), Some("x"));
    }

    #[test]
    fn test_parse_several_top_level_elements() {
        let text = r#"<?xml version="1.0"?>
<!-- two roots -->
<svg><path d="M0 0"/></svg>
<svg/>"#;
        let doc = parse_document(text, Stage::Reroot).unwrap();

        assert_eq!(doc.children.len(), 2);
        assert!(doc.children.iter().all(|node| node.is_element_named("svg")));
    }

    #[test]
    fn test_parse_text_next_to_root() {
        let doc = parse_document("<svg/>stray", Stage::Reroot).unwrap();
        assert_eq!(doc.children.len(), 2);
        assert_eq!(doc.children[1], Node::Text("stray".to_string()));
    }

    #[test]
    fn test_skip_prolog() {
        assert_eq!(
            skip_prolog("<?xml version=\"1.0\"?>\n<!DOCTYPE svg [<!ENTITY a \"b\">]>\n<!-- c --><svg/>"),
            "<svg/>"
        );
        assert_eq!(skip_prolog("<svg/>"), "<svg/>");
    }

    #[test]
    fn test_parse_error_is_reported_with_stage() {
        let err = parse_document("<svg><path></svg>", Stage::Reroot).unwrap_err();
        match err {
            IconError::Parse { stage, .. } => assert_eq!(stage, Stage::Reroot),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
