use crate::error::Result;
use crate::optimizer::numbers::{format_number, parse_length};
use crate::types::Document;

/// Remove `width` and `height` from the root `svg`
///
/// The consumer of the icon controls its size. When the root has no
/// `viewBox`, one is synthesized from the dimensions first; if the
/// dimensions are not plain numbers the attributes are kept.
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_dimensions;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(r#"<svg width="24" height="24"/>"#, Stage::Optimize).unwrap();
/// remove_dimensions(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg viewBox="0 0 24 24"/>"#);
/// ```
pub fn remove_dimensions(doc: &mut Document) -> Result<()> {
    let Some(svg) = doc.root_element_mut().filter(|root| root.name == "svg") else {
        return Ok(());
    };

    if !svg.has_attr("viewBox") {
        let width = svg.attr("width").and_then(parse_length);
        let height = svg.attr("height").and_then(parse_length);
        let (Some(width), Some(height)) = (width, height) else {
            return Ok(());
        };
        let view_box = format!("0 0 {} {}", format_number(width, 4), format_number(height, 4));
        svg.set_attr("viewBox", &view_box);
    }

    svg.remove_attr("width");
    svg.remove_attr("height");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::parser::{parse_document, serialize_document};

    fn run(text: &str) -> String {
        let mut doc = parse_document(text, Stage::Optimize).unwrap();
        remove_dimensions(&mut doc).unwrap();
        serialize_document(&doc)
    }

    #[test]
    fn test_existing_view_box_is_kept() {
        assert_eq!(
            run(r#"<svg width="48px" height="48px" viewBox="0 0 24 24"/>"#),
            r#"<svg viewBox="0 0 24 24"/>"#
        );
    }

    #[test]
    fn test_relative_dimensions_without_view_box() {
        let text = r#"<svg width="100%" height="100%"/>"#;
        assert_eq!(run(text), text);
    }

    #[test]
    fn test_nested_svg_untouched() {
        assert_eq!(
            run(r#"<svg viewBox="0 0 2 2"><svg width="1" height="1"/></svg>"#),
            r#"<svg viewBox="0 0 2 2"><svg width="1" height="1"/></svg>"#
        );
    }
}
