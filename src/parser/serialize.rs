use crate::types::{Document, Element, Node};

/// Serialize a document tree to minimal markup
///
/// No indentation and no whitespace between tags is added. Elements without
/// children are written self-closing (`<path d="M0 0"/>`), attributes are
/// written in their stored order.
///
/// # Examples
/// ```
/// use fig2icon::parser::serialize_document;
/// use fig2icon::types::{Document, Element, Node};
///
/// let path = Element::new("path").with_attr("d", "M0 0");
/// let doc = Document::new(vec![Node::Element(Element::new("svg").with_child(Node::Element(path)))]);
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0"/></svg>"#);
/// ```
pub fn serialize_document(doc: &Document) -> String {
    let mut out = String::new();
    for node in &doc.children {
        write_node(&mut out, node);
    }
    out
}

/// Serialize a single element and its subtree
pub fn serialize_element(elem: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, elem);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(elem) => write_element(out, elem),
        Node::Text(text) => out.push_str(&escape_text(text)),
    }
}

fn write_element(out: &mut String, elem: &Element) {
    out.push('<');
    out.push_str(&elem.name);
    for (name, value) in &elem.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if elem.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &elem.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&elem.name);
    out.push('>');
}

/// Escape an attribute value for a double-quoted attribute
///
/// `>` is escaped too so that no attribute value can contain a tag
/// terminator; the output rewrites rely on that.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
