use crate::error::Result;
use crate::optimizer::numbers::parse_length;
use crate::types::{Document, Element, Node};

/// Elements whose text content is significant
const TEXT_ELEMENTS: &[&str] = &["text", "textPath", "tspan", "title", "desc", "style", "script"];

/// Elements that only render when referenced by id
const NON_RENDERING_ELEMENTS: &[&str] = &[
    "clipPath",
    "filter",
    "linearGradient",
    "marker",
    "mask",
    "pattern",
    "radialGradient",
    "symbol",
];

/// Remove elements that have no rendering effect
///
/// An element is removed when:
/// - it has `display="none"` or `opacity="0"`
/// - it has `visibility="hidden"` and no descendant turns visibility back on
/// - it is a zero-sized `rect`, `circle` or `ellipse`
/// - it is a `path` without path data, or a `polyline` / `polygon` without points
/// - it is an `image` referencing a raster file
/// - it is a `text` without content
/// - it is a non-rendering element (`clipPath`, `mask`, gradients...) without an id
/// - it is a child of `defs` that neither has nor contains an id
///
/// Whitespace-only text nodes outside text elements are removed as well,
/// and so are `defs` left without children.
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_hidden;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg> <path d="M0 0" display="none"/> <rect width="0" height="4"/> <path d="M1 1"/> </svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// remove_hidden(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M1 1"/></svg>"#);
/// ```
pub fn remove_hidden(doc: &mut Document) -> Result<()> {
    doc.children
        .retain(|node| !matches!(node, Node::Text(text) if text.trim().is_empty()));
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        clean_element(elem);
    }
    Ok(())
}

fn clean_element(elem: &mut Element) {
    let keep_text = TEXT_ELEMENTS.contains(&elem.name.as_str());
    let in_defs = elem.name == "defs";

    elem.children.retain(|node| match node {
        Node::Text(text) => keep_text || !text.trim().is_empty(),
        Node::Element(child) => !is_hidden(child) && !(in_defs && !contains_id(child)),
    });

    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        clean_element(child);
    }

    elem.children.retain(|node| {
        !(node.is_element_named("defs") && node.as_element().is_some_and(|d| d.children.is_empty()))
    });
}

/// Check if an element can be removed without changing the rendering
fn is_hidden(elem: &Element) -> bool {
    if elem.attr("display") == Some("none") {
        return true;
    }
    if elem.attr("opacity").and_then(parse_length) == Some(0.0) {
        return true;
    }
    if elem.attr("visibility") == Some("hidden") && !has_visible_descendant(elem) {
        return true;
    }

    let is_zero = |name: &str| elem.attr(name).and_then(parse_length) == Some(0.0);
    match elem.name.as_str() {
        "rect" => elem.children.is_empty() && (is_zero("width") || is_zero("height")),
        "circle" => elem.children.is_empty() && is_zero("r"),
        "ellipse" => elem.children.is_empty() && (is_zero("rx") || is_zero("ry")),
        "path" => elem.attr("d").is_none_or(|d| d.trim().is_empty()),
        "polyline" | "polygon" => elem.attr("points").is_none_or(|p| p.trim().is_empty()),
        "image" => is_raster_image(elem),
        "text" => !elem.has_content(),
        name if NON_RENDERING_ELEMENTS.contains(&name) => !elem.has_attr("id"),
        _ => false,
    }
}

fn has_visible_descendant(elem: &Element) -> bool {
    elem.child_elements().any(|child| {
        child.attr("visibility") == Some("visible") || has_visible_descendant(child)
    })
}

fn contains_id(elem: &Element) -> bool {
    elem.has_attr("id") || elem.child_elements().any(contains_id)
}

/// Check if an `image` element references a raster file or data URI
fn is_raster_image(elem: &Element) -> bool {
    let Some(href) = elem.attr("href").or_else(|| elem.attr("xlink:href")) else {
        return true;
    };
    let href = href.trim().to_ascii_lowercase();

    if let Some(data) = href.strip_prefix("data:") {
        return ["image/png", "image/jpeg", "image/jpg", "image/gif", "image/webp"]
            .iter()
            .any(|mime| data.starts_with(mime));
    }

    [".png", ".jpg", ".jpeg", ".gif", ".webp"]
        .iter()
        .any(|ext| href.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    fn run(text: &str) -> String {
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        remove_hidden(&mut doc).unwrap();
        serialize_document(&doc)
    }

    #[test]
    fn test_removes_transparent_and_empty_shapes() {
        let text = r#"<svg><g opacity="0"><path d="M0 0"/></g><circle r="0"/><ellipse rx="2" ry="0"/><path d=""/><path/><polygon/><path d="M1 1"/></svg>"#;
        assert_eq!(run(text), r#"<svg><path d="M1 1"/></svg>"#);
    }

    #[test]
    fn test_visibility_hidden_with_visible_child_is_kept() {
        let text = r#"<svg><g visibility="hidden"><path d="M0 0" visibility="visible"/></g><g visibility="hidden"><path d="M1 1"/></g></svg>"#;
        assert_eq!(
            run(text),
            r#"<svg><g visibility="hidden"><path d="M0 0" visibility="visible"/></g></svg>"#
        );
    }

    #[test]
    fn test_removes_raster_images() {
        let text = r#"<svg><image href="photo.PNG"/><image xlink:href="data:image/png;base64,AAAA" xmlns:xlink="http://www.w3.org/1999/xlink"/><image href="vector.svg"/></svg>"#;
        assert_eq!(run(text), r#"<svg><image href="vector.svg"/></svg>"#);
    }

    #[test]
    fn test_removes_useless_defs() {
        let text = r#"<svg><defs><path d="M0 0"/><clipPath id="a"><rect width="1" height="1"/></clipPath></defs><defs><g/></defs></svg>"#;
        assert_eq!(
            run(text),
            r#"<svg><defs><clipPath id="a"><rect width="1" height="1"/></clipPath></defs></svg>"#
        );
    }

    #[test]
    fn test_removes_unreferenceable_clip_path() {
        let text = r#"<svg><clipPath><rect width="1" height="1"/></clipPath><path d="M0 0"/></svg>"#;
        assert_eq!(run(text), r#"<svg><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn test_keeps_text_whitespace() {
        let text = "<svg><text> a b </text><text> </text></svg>";
        assert_eq!(run(text), "<svg><text> a b </text></svg>");
    }

    #[test]
    fn test_keeps_single_moveto_path() {
        assert_eq!(run(r#"<svg><path d="M0 0"/></svg>"#), r#"<svg><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let once = run(r#"<svg> <defs><path d="M0 0"/><clipPath id="a"><rect width="1" height="1"/></clipPath></defs> <g visibility="hidden"><path d="M1 1"/></g><path d="M2 2"/></svg>"#);
        assert_eq!(run(&once), once);
    }
}
