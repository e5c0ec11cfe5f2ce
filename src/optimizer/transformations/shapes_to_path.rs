use crate::error::Result;
use crate::optimizer::numbers::{parse_length, parse_number_list};
use crate::types::{Document, Element, Node};

/// Convert basic shapes into `path` elements
///
/// Handles `rect` without rounded corners, `line`, `polyline`, `polygon`,
/// `circle` and `ellipse`. The geometry attributes are replaced by a `d`
/// attribute written with absolute commands; `path_data` shortens it
/// afterwards. Shapes whose geometry uses units other than `px` are left
/// untouched. A `polyline` or `polygon` with fewer than two points draws
/// nothing and is removed.
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::shapes_to_path;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><rect x="2" y="2" width="4" height="6" fill="red"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// shapes_to_path(&mut doc).unwrap();
/// assert_eq!(
///     serialize_document(&doc),
///     r#"<svg><path fill="red" d="M2 2H6V8H2z"/></svg>"#
/// );
/// ```
pub fn shapes_to_path(doc: &mut Document) -> Result<()> {
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        convert_children(elem);
    }
    Ok(())
}

fn convert_children(elem: &mut Element) {
    elem.children.retain(|node| match node {
        Node::Element(child) => !is_degenerate_poly(child),
        Node::Text(_) => true,
    });

    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        if let Some((d, consumed)) = shape_path_data(child) {
            child
                .attributes
                .retain(|(name, _)| !consumed.contains(&name.as_str()));
            child.name = "path".to_string();
            child.set_attr("d", &d);
        }
        convert_children(child);
    }
}

const RECT_ATTRS: &[&str] = &["x", "y", "width", "height", "rx", "ry"];
const LINE_ATTRS: &[&str] = &["x1", "y1", "x2", "y2"];
const POLY_ATTRS: &[&str] = &["points"];
const CIRCLE_ATTRS: &[&str] = &["cx", "cy", "r"];
const ELLIPSE_ATTRS: &[&str] = &["cx", "cy", "rx", "ry"];

/// Path data equivalent to a shape, with the attributes it replaces
fn shape_path_data(elem: &Element) -> Option<(String, &'static [&'static str])> {
    let length = |name: &str| match elem.attr(name) {
        Some(value) => parse_length(value),
        None => Some(0.0),
    };

    match elem.name.as_str() {
        "rect" => {
            let square = |name: &str| elem.attr(name).is_none_or(|v| parse_length(v) == Some(0.0));
            if !square("rx") || !square("ry") {
                return None;
            }
            let (x, y) = (length("x")?, length("y")?);
            let width = parse_length(elem.attr("width")?)?;
            let height = parse_length(elem.attr("height")?)?;
            let d = format!(
                "M{} {}H{}V{}H{}z",
                x,
                y,
                x + width,
                y + height,
                x
            );
            Some((d, RECT_ATTRS))
        }
        "line" => {
            let d = format!(
                "M{} {}L{} {}",
                length("x1")?,
                length("y1")?,
                length("x2")?,
                length("y2")?
            );
            Some((d, LINE_ATTRS))
        }
        "polyline" | "polygon" => {
            let coords = parse_number_list(elem.attr("points")?)?;
            let mut d = String::new();
            for (i, pair) in coords.chunks_exact(2).enumerate() {
                d.push(if i == 0 { 'M' } else { 'L' });
                d.push_str(&format!("{} {}", pair[0], pair[1]));
            }
            if elem.name == "polygon" {
                d.push('z');
            }
            Some((d, POLY_ATTRS))
        }
        "circle" => {
            let (cx, cy, r) = (length("cx")?, length("cy")?, length("r")?);
            Some((ellipse_path(cx, cy, r, r), CIRCLE_ATTRS))
        }
        "ellipse" => {
            let (cx, cy) = (length("cx")?, length("cy")?);
            let (rx, ry) = (length("rx")?, length("ry")?);
            Some((ellipse_path(cx, cy, rx, ry), ELLIPSE_ATTRS))
        }
        _ => None,
    }
}

/// Full ellipse as two half arcs from the top to the bottom and back
fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    format!(
        "M{cx} {top}A{rx} {ry} 0 1 0 {cx} {bottom}A{rx} {ry} 0 1 0 {cx} {top}z",
        top = cy - ry,
        bottom = cy + ry,
    )
}

fn is_degenerate_poly(elem: &Element) -> bool {
    if elem.name != "polyline" && elem.name != "polygon" {
        return false;
    }
    elem.attr("points")
        .and_then(parse_number_list)
        .is_some_and(|coords| coords.len() < 4)
}
