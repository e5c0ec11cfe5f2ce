use crate::error::{IconError, Result, Stage};
use crate::parser::{parse_document, serialize_document};
use crate::types::{Document, Node};
use tracing::debug;

/// Name prefix marking the children promoted in multi-child mode
///
/// The translator relies on it to find element boundaries, then strips it.
pub const SYNTHETIC_PREFIX: &str = "SVGChild:";

/// Result of the re-rooting pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rerooted {
    /// Serialized children of the former `svg` root
    pub text: String,
    /// Set when the root had more than one child
    pub multiple_children: bool,
}

/// Promote the children of the `svg` root to the top level
///
/// The optimized markup must hold exactly one top-level node, and that node
/// must be the `svg` element. When the `svg` has more than one child, every
/// element child gets a zero-based `key` attribute (its position among the
/// children, put first) and its name is prefixed with [`SYNTHETIC_PREFIX`].
///
/// # Arguments
/// * `text` - Optimized SVG markup
///
/// # Returns
/// * `Ok(Rerooted)` - The serialized children and the multi-child flag
/// * `Err(IconError::Parse)` - If the markup is not well-formed
/// * `Err(IconError::RootShape)` - If the top level is not a single `svg`
///
/// # Examples
/// ```
/// use fig2icon::reroot::reroot;
///
/// let single = reroot(r#"<svg><path d="M0 0"/></svg>"#).unwrap();
/// assert_eq!(single.text, r#"<path d="M0 0"/>"#);
/// assert!(!single.multiple_children);
///
/// let multiple = reroot(r#"<svg><path d="M0 0"/><circle r="1"/></svg>"#).unwrap();
/// assert_eq!(
///     multiple.text,
///     r#"<SVGChild:path key="0" d="M0 0"/><SVGChild:circle key="1" r="1"/>"#
/// );
/// assert!(multiple.multiple_children);
/// ```
pub fn reroot(text: &str) -> Result<Rerooted> {
    let doc = parse_document(text, Stage::Reroot)?;

    let mut top_level = doc.children.into_iter();
    let root = top_level.next();
    if top_level.next().is_some() {
        return Err(IconError::RootShape("expected a single child of the root"));
    }
    let mut svg = match root {
        Some(Node::Element(elem)) if elem.name == "svg" => elem,
        _ => return Err(IconError::RootShape("expected the container type as the root")),
    };

    let multiple_children = svg.children.len() > 1;
    if multiple_children {
        for (index, child) in svg.children.iter_mut().enumerate() {
            if let Node::Element(elem) = child {
                elem.remove_attr("key");
                elem.attributes.insert(0, ("key".to_string(), index.to_string()));
                elem.name = format!("{}{}", SYNTHETIC_PREFIX, elem.name);
            }
        }
    }

    let text = serialize_document(&Document::new(svg.children));
    debug!(multiple_children, len = text.len(), "rerooted svg children");
    Ok(Rerooted {
        text,
        multiple_children,
    })
}
