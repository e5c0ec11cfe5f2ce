use crate::error::Result;
use crate::optimizer::numbers::{format_number, parse_length, parse_number_list};
use crate::types::Document;

/// Attributes holding a list of numbers
const LIST_ATTRS: &[&str] = &["viewBox", "points", "stroke-dasharray", "enable-background"];

/// Attributes that look numeric but must keep their exact text
const SKIPPED_ATTRS: &[&str] = &["d", "id", "class", "style", "transform", "version", "key"];

/// Round numeric attribute values and lists to `precision`
///
/// Single values with no unit or a `px` unit are rounded, lose the unit and
/// their leading zero (`0.50px` becomes `.5`). Lists in [`LIST_ATTRS`] are
/// rounded element-wise and joined with single spaces. Values with other
/// units (`%`, `em`...) are left as they are.
///
/// # Arguments
/// * `doc` - The document to modify
/// * `precision` - Number of fractional digits to keep
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::cleanup_numeric_values;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg viewBox="0, 0, 24.000001, 24" width="24px"><path stroke-width="0.50" d="M0 0"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// cleanup_numeric_values(&mut doc, 4).unwrap();
/// assert_eq!(
///     serialize_document(&doc),
///     r#"<svg viewBox="0 0 24 24" width="24"><path stroke-width=".5" d="M0 0"/></svg>"#
/// );
/// ```
pub fn cleanup_numeric_values(doc: &mut Document, precision: u8) -> Result<()> {
    doc.for_each_element_mut(&mut |elem| {
        for (name, value) in elem.attributes.iter_mut() {
            if SKIPPED_ATTRS.contains(&name.as_str()) {
                continue;
            }

            let cleaned = if LIST_ATTRS.contains(&name.as_str()) {
                parse_number_list(value).filter(|list| !list.is_empty()).map(|list| {
                    list.iter()
                        .map(|n| format_number(*n, precision))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
            } else {
                parse_length(value).map(|n| format_number(n, precision))
            };

            if let Some(cleaned) = cleaned {
                if cleaned != *value {
                    *value = cleaned;
                }
            }
        }
    });
    Ok(())
}
