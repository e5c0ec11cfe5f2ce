use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Hardcoded icon color applied by the exporter to every shape
static HARDCODED_FILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r##" fill="#010101""##).unwrap());

/// Transparent full-canvas rectangle used as a bounding box placeholder
static BOUNDING_BOX_RECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<rect fill="none" width="24" height="24"/>"#).unwrap());

/// Full-canvas rectangle carrying the exporter's placeholder id
static PLACEHOLDER_RECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<rect id="SVGID_1_" width="24" height="24"/>"#).unwrap());

/// Remove export artifacts from raw SVG text before it is parsed
///
/// These literals are semantically inert (an opaque-canceling fill and two
/// invisible full-canvas rectangles), but the optimizer only eliminates the
/// containers around them once they are gone. The match is purely textual:
/// the same shapes written with other attribute order or spacing are left
/// to the optimizer.
///
/// # Arguments
/// * `text` - Raw SVG markup
///
/// # Returns
/// The markup with every occurrence of the known literals removed
///
/// # Examples
/// ```
/// use fig2icon::scrub::scrub_literals;
///
/// let svg = r##"<svg><path fill="#010101" d="M0 0"/><rect fill="none" width="24" height="24"/></svg>"##;
/// assert_eq!(scrub_literals(svg), r#"<svg><path d="M0 0"/></svg>"#);
/// ```
pub fn scrub_literals(text: &str) -> String {
    let text = HARDCODED_FILL.replace_all(text, "");
    let text = BOUNDING_BOX_RECT.replace_all(&text, "");
    let text = PLACEHOLDER_RECT.replace_all(&text, "");

    trace!(len = text.len(), "scrubbed export literals");
    text.into_owned()
}
