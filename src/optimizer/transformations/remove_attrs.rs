use crate::error::{IconError, Result};
use crate::types::Document;
use regex::Regex;

/// Remove attributes whose name matches one of the patterns
///
/// Each pattern is a regular expression matched against the whole
/// attribute name, on every element. The default icon preset uses
/// `(.*-)?opacity` so that the generated icon inherits its opacity.
///
/// # Arguments
/// * `doc` - The document to modify
/// * `patterns` - Attribute name patterns
///
/// # Returns
/// * `Ok(())` - Attributes were removed
/// * `Err(IconError::InvalidPattern)` - If a pattern is not a valid regex
///
/// # Examples
/// ```
/// use fig2icon::error::Stage;
/// use fig2icon::optimizer::transformations::remove_attrs;
/// use fig2icon::parser::{parse_document, serialize_document};
///
/// let mut doc = parse_document(
///     r#"<svg><path opacity=".5" fill-opacity=".3" data-opacity-level="1" d="M0 0"/></svg>"#,
///     Stage::Optimize,
/// ).unwrap();
/// remove_attrs(&mut doc, &["(.*-)?opacity".to_string()]).unwrap();
/// assert_eq!(
///     serialize_document(&doc),
///     r#"<svg><path data-opacity-level="1" d="M0 0"/></svg>"#
/// );
/// ```
pub fn remove_attrs(doc: &mut Document, patterns: &[String]) -> Result<()> {
    let regexes = patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| IconError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if regexes.is_empty() {
        return Ok(());
    }

    doc.for_each_element_mut(&mut |elem| {
        elem.attributes
            .retain(|(name, _)| !regexes.iter().any(|regex| regex.is_match(name)));
    });
    Ok(())
}
