//! SVG attribute and element tables shared by the transformations

use crate::types::Document;
use std::collections::HashSet;

/// Presentation attributes that may also be written as style declarations
pub const PRESENTATION_ATTRS: &[&str] = &[
    "alignment-baseline",
    "baseline-shift",
    "clip",
    "clip-path",
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "direction",
    "display",
    "dominant-baseline",
    "enable-background",
    "fill",
    "fill-opacity",
    "fill-rule",
    "filter",
    "flood-color",
    "flood-opacity",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "image-rendering",
    "letter-spacing",
    "lighting-color",
    "marker-end",
    "marker-mid",
    "marker-start",
    "mask",
    "opacity",
    "overflow",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "stop-color",
    "stop-opacity",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-decoration",
    "text-rendering",
    "transform",
    "unicode-bidi",
    "visibility",
    "word-spacing",
    "writing-mode",
];

/// Presentation attributes inherited by descendants
pub const INHERITABLE_ATTRS: &[&str] = &[
    "clip-rule",
    "color",
    "color-interpolation",
    "color-interpolation-filters",
    "color-profile",
    "color-rendering",
    "cursor",
    "direction",
    "dominant-baseline",
    "fill",
    "fill-opacity",
    "fill-rule",
    "font-family",
    "font-size",
    "font-size-adjust",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "glyph-orientation-horizontal",
    "glyph-orientation-vertical",
    "image-rendering",
    "letter-spacing",
    "marker-end",
    "marker-mid",
    "marker-start",
    "paint-order",
    "pointer-events",
    "shape-rendering",
    "stroke",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-linecap",
    "stroke-linejoin",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
    "text-rendering",
    "visibility",
    "word-spacing",
    "writing-mode",
];

/// Non-inheritable presentation attributes that still mean something on a group
pub const GROUP_NON_INHERITABLE_ATTRS: &[&str] = &[
    "clip-path",
    "display",
    "filter",
    "mask",
    "opacity",
    "text-decoration",
    "transform",
    "unicode-bidi",
];

/// Attributes holding a paint or color value
pub const COLOR_ATTRS: &[&str] = &[
    "color",
    "fill",
    "flood-color",
    "lighting-color",
    "stop-color",
    "stroke",
];

/// Initial values of presentation attributes
pub const PRESENTATION_DEFAULTS: &[(&str, &str)] = &[
    ("clip-rule", "nonzero"),
    ("display", "inline"),
    ("fill-opacity", "1"),
    ("fill-rule", "nonzero"),
    ("opacity", "1"),
    ("stop-opacity", "1"),
    ("stroke", "none"),
    ("stroke-dasharray", "none"),
    ("stroke-dashoffset", "0"),
    ("stroke-linecap", "butt"),
    ("stroke-linejoin", "miter"),
    ("stroke-miterlimit", "4"),
    ("stroke-opacity", "1"),
    ("stroke-width", "1"),
    ("visibility", "visible"),
];

/// Geometry attributes whose initial value is zero, per element
pub const ZERO_DEFAULT_GEOMETRY: &[(&str, &[&str])] = &[
    ("rect", &["x", "y"]),
    ("circle", &["cx", "cy"]),
    ("ellipse", &["cx", "cy"]),
    ("line", &["x1", "y1", "x2", "y2"]),
    ("image", &["x", "y"]),
    ("use", &["x", "y"]),
];

/// Attributes that carry no meaning on the root `svg` of an inline icon
pub const USELESS_ROOT_ATTRS: &[&str] = &["version", "baseProfile", "xml:space", "x", "y"];

/// Elements that render geometry
pub const SHAPE_ELEMENTS: &[&str] = &[
    "circle", "ellipse", "line", "path", "polygon", "polyline", "rect",
];

/// Elements that only contain other elements
pub const CONTAINER_ELEMENTS: &[&str] = &[
    "a", "clipPath", "defs", "g", "marker", "mask", "pattern", "svg", "switch", "symbol",
];

/// Elements that never render by themselves
pub const METADATA_ELEMENTS: &[&str] = &["desc", "metadata", "title"];

/// Namespaces written by design tools for their own bookkeeping
pub const EDITOR_NAMESPACES: &[&str] = &[
    "http://creativecommons.org/ns#",
    "http://inkscape.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://ns.adobe.com/AdobeIllustrator/10.0/",
    "http://ns.adobe.com/AdobeSVGViewerExtensions/3.0/",
    "http://ns.adobe.com/Extensibility/1.0/",
    "http://ns.adobe.com/Flows/1.0/",
    "http://ns.adobe.com/GenericCustomNamespace/1.0/",
    "http://ns.adobe.com/Graphs/1.0/",
    "http://ns.adobe.com/ImageReplacement/1.0/",
    "http://ns.adobe.com/SaveForWeb/1.0/",
    "http://ns.adobe.com/Variables/1.0/",
    "http://ns.adobe.com/XPath/1.0/",
    "http://purl.org/dc/elements/1.1/",
    "http://schemas.microsoft.com/visio/2003/SVGExtensions/",
    "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://taptrix.com/vectorillustrator/svg_extensions",
    "http://www.bohemiancoding.com/sketch/ns",
    "http://www.figma.com/figma/ns",
    "http://www.inkscape.org/namespaces/inkscape",
    "http://www.serif.com/",
    "http://www.vector.evaxdesigns.com/svgz/vectorillustrator",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
];

pub fn is_presentation(name: &str) -> bool {
    PRESENTATION_ATTRS.contains(&name)
}

pub fn is_inheritable(name: &str) -> bool {
    INHERITABLE_ATTRS.contains(&name)
}

pub fn is_shape(name: &str) -> bool {
    SHAPE_ELEMENTS.contains(&name)
}

pub fn is_container(name: &str) -> bool {
    CONTAINER_ELEMENTS.contains(&name)
}

/// Initial value of a presentation attribute, if it has a well-known one
pub fn presentation_default(name: &str) -> Option<&'static str> {
    PRESENTATION_DEFAULTS
        .iter()
        .find(|(attr, _)| *attr == name)
        .map(|(_, value)| *value)
}

/// Check if a geometry attribute defaults to zero on the given element
pub fn is_zero_default_geometry(element: &str, attr: &str) -> bool {
    ZERO_DEFAULT_GEOMETRY
        .iter()
        .any(|(elem, attrs)| *elem == element && attrs.contains(&attr))
}

/// Extract the id referenced by `url(#id)` inside an attribute value
pub fn url_reference(value: &str) -> Option<&str> {
    let start = value.find("url(")? + 4;
    let end = start + value[start..].find(')')?;
    let inner = value[start..end].trim().trim_matches(['"', '\'']);
    inner.strip_prefix('#')
}

/// Collect every id referenced from the document
///
/// References are `url(#id)` inside any attribute value and `#id` in
/// `href` / `xlink:href`.
pub fn referenced_ids(doc: &Document) -> HashSet<String> {
    let mut ids = HashSet::new();
    doc.for_each_element(&mut |elem| {
        for (name, value) in &elem.attributes {
            if name == "href" || name == "xlink:href" {
                if let Some(id) = value.strip_prefix('#') {
                    ids.insert(id.to_string());
                }
            } else if let Some(id) = url_reference(value) {
                ids.insert(id.to_string());
            }
        }
    });
    ids
}
