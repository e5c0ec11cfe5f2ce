use crate::error::Result;
use crate::optimizer::attributes::{url_reference, COLOR_ATTRS};
use crate::types::{Document, Element, Node};
use std::str::FromStr;
use svgtypes::Color;

/// Color keywords shorter than their hex value
const SHORT_NAMES: &[(&str, &str)] = &[
    ("#f0ffff", "azure"),
    ("#f5f5dc", "beige"),
    ("#ffe4c4", "bisque"),
    ("#a52a2a", "brown"),
    ("#ff7f50", "coral"),
    ("#ffd700", "gold"),
    ("#808080", "gray"),
    ("#008000", "green"),
    ("#4b0082", "indigo"),
    ("#fffff0", "ivory"),
    ("#f0e68c", "khaki"),
    ("#faf0e6", "linen"),
    ("#800000", "maroon"),
    ("#000080", "navy"),
    ("#808000", "olive"),
    ("#ffa500", "orange"),
    ("#da70d6", "orchid"),
    ("#cd853f", "peru"),
    ("#ffc0cb", "pink"),
    ("#dda0dd", "plum"),
    ("#800080", "purple"),
    ("#f00", "red"),
    ("#fa8072", "salmon"),
    ("#a0522d", "sienna"),
    ("#c0c0c0", "silver"),
    ("#fffafa", "snow"),
    ("#d2b48c", "tan"),
    ("#008080", "teal"),
    ("#ff6347", "tomato"),
    ("#ee82ee", "violet"),
    ("#f5deb3", "wheat"),
];

/// Paint keywords that are never replaced by `currentColor`
const PRESERVED_PAINTS: &[&str] = &["none", "inherit", "currentColor", "transparent"];

/// Convert colors to their shortest form
///
/// Named colors and `rgb()` notations become hex, hex is lowercased and
/// shortened (`#aabbcc` to `#abc`), and names shorter than their hex value
/// are preferred (`#f00` to `red`).
///
/// With `current_color` set, every paint of [`COLOR_ATTRS`] other than
/// `none`, `inherit`, `transparent` and `url(...)` references becomes
/// `currentColor`, except inside `mask` elements where the color drives
/// the mask luminance.
///
/// # Arguments
/// * `doc` - The document to modify
/// * `current_color` - Replace paint colors with `currentColor`
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::convert_colors;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r##"<svg><path fill="#FF0000" stroke="rgb(0, 0, 255)"/></svg>"##,
///     Stage::Optimize,
/// ).unwrap();
/// convert_colors(&mut doc, false).unwrap();
/// assert_eq!(serialize_document(&doc), r##"<svg><path fill="red" stroke="#00f"/></svg>"##);
/// ```
pub fn convert_colors(doc: &mut Document, current_color: bool) -> Result<()> {
    for elem in doc.children.iter_mut().filter_map(Node::as_element_mut) {
        convert_element(elem, current_color);
    }
    Ok(())
}

fn convert_element(elem: &mut Element, current_color: bool) {
    // Colors inside a mask define its luminance
    let current_color = current_color && elem.name != "mask";

    for (name, value) in elem.attributes.iter_mut() {
        if !COLOR_ATTRS.contains(&name.as_str()) {
            continue;
        }
        let converted = if current_color && name != "color" && adopts_current_color(value) {
            "currentColor".to_string()
        } else {
            shortest_color(value)
        };
        if converted != *value {
            *value = converted;
        }
    }

    for child in elem.children.iter_mut().filter_map(Node::as_element_mut) {
        convert_element(child, current_color);
    }
}

fn adopts_current_color(value: &str) -> bool {
    !PRESERVED_PAINTS.contains(&value) && url_reference(value).is_none()
}

/// Shortest equivalent form of a color value; unknown values are returned unchanged
///
/// Colors with transparency are kept as written, since hex notation
/// would drop the alpha channel.
fn shortest_color(value: &str) -> String {
    let Ok(color) = Color::from_str(value.trim()) else {
        return value.to_string();
    };
    if color.alpha != u8::MAX {
        return value.to_string();
    }

    let hex = shorten_hex(&format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue));
    SHORT_NAMES
        .iter()
        .find(|(named_hex, _)| *named_hex == hex)
        .map_or(hex, |(_, name)| name.to_string())
}

/// Turn `#aabbcc` into `#abc` when every channel repeats its digit
fn shorten_hex(hex: &str) -> String {
    let bytes = hex.as_bytes();
    if bytes.len() == 7 && bytes[1] == bytes[2] && bytes[3] == bytes[4] && bytes[5] == bytes[6] {
        let short = [bytes[1], bytes[3], bytes[5]];
        format!("#{}", String::from_utf8_lossy(&short))
    } else {
        hex.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    fn run(text: &str, current_color: bool) -> String {
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        convert_colors(&mut doc, current_color).unwrap();
        serialize_document(&doc)
    }

    #[test]
    fn test_shortest_color() {
        assert_eq!(shortest_color("#AABBCC"), "#abc");
        assert_eq!(shortest_color("#123456"), "#123456");
        assert_eq!(shortest_color("white"), "#fff");
        assert_eq!(shortest_color("#ff0000"), "red");
        assert_eq!(shortest_color("#000080"), "navy");
        assert_eq!(shortest_color("rgb(255, 0, 0)"), "red");
        assert_eq!(shortest_color("rgb(1, 2, 3)"), "#010203");
        assert_eq!(shortest_color("grey"), "gray");
        assert_eq!(shortest_color("rgba(0, 0, 0, 0.5)"), "rgba(0, 0, 0, 0.5)");
        assert_eq!(shortest_color("currentColor"), "currentColor");
        assert_eq!(shortest_color("var(--accent)"), "var(--accent)");
    }

    #[test]
    fn test_current_color_replaces_paints() {
        assert_eq!(
            run(r##"<svg><path fill="#010101" stroke="none"/><path fill="url(#g)" stop-color="red"/></svg>"##, true),
            r##"<svg><path fill="currentColor" stroke="none"/><path fill="url(#g)" stop-color="currentColor"/></svg>"##
        );
    }

    #[test]
    fn test_mask_colors_are_preserved() {
        assert_eq!(
            run(r##"<svg><mask id="m"><path fill="#FFFFFF"/></mask><path fill="#FFFFFF"/></svg>"##, true),
            r##"<svg><mask id="m"><path fill="#fff"/></mask><path fill="currentColor"/></svg>"##
        );
    }

    #[test]
    fn test_color_attribute_is_shortened_only() {
        assert_eq!(
            run(r##"<svg color="#FFFFFF"/>"##, true),
            r##"<svg color="#fff"/>"##
        );
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let text = r##"<svg><path fill="#FF0000" stroke="rgb(0, 0, 255)"/><path fill="rgba(0, 0, 0, 0.5)" stroke="white"/></svg>"##;
        for current_color in [false, true] {
            let once = run(text, current_color);
            assert_eq!(run(&once, current_color), once);
        }
    }
}
