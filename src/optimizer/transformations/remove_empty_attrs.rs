use crate::error::Result;
use crate::types::Document;

/// Conditional processing attributes where an empty value is meaningful
/// (it disables the element)
const CONDITIONAL_ATTRS: &[&str] = &["requiredExtensions", "requiredFeatures", "systemLanguage"];

/// Remove attributes with an empty value
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_empty_attrs;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(r#"<svg><path class="" d="M0 0"/></svg>"#, Stage::Optimize).unwrap();
/// remove_empty_attrs(&mut doc).unwrap();
/// assert_eq!(serialize_document(&doc), r#"<svg><path d="M0 0"/></svg>"#);
/// ```
pub fn remove_empty_attrs(doc: &mut Document) -> Result<()> {
    doc.for_each_element_mut(&mut |elem| {
        elem.attributes
            .retain(|(name, value)| !value.is_empty() || CONDITIONAL_ATTRS.contains(&name.as_str()));
    });
    Ok(())
}
