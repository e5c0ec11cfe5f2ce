use crate::error::Result;
use crate::types::Document;

/// Normalize whitespace inside attribute values
///
/// Newlines and runs of whitespace are collapsed into a single space and
/// the value is trimmed. The legacy `enable-background` attribute is
/// dropped: no current renderer reads it and exporters write it with the
/// canvas size.
///
/// # Arguments
/// * `doc` - The document to modify
///
/// # Returns
/// * `Ok(())` - Successfully cleaned all attributes
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::cleanup_attrs;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document("<svg><path d=\"M0 0\n   h1 \"/></svg>", Stage::Optimize).unwrap();
/// cleanup_attrs(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0 h1"/></svg>"#);
/// ```
pub fn cleanup_attrs(doc: &mut Document) -> Result<()> {
    doc.for_each_element_mut(&mut |elem| {
        elem.attributes.retain(|(name, _)| name != "enable-background");
        for (_, value) in elem.attributes.iter_mut() {
            let cleaned = collapse_whitespace(value);
            if cleaned != *value {
                *value = cleaned;
            }
        }
    });
    Ok(())
}

/// Collapse every whitespace run into one space and trim both ends
fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
