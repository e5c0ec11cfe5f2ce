use crate::reroot::SYNTHETIC_PREFIX;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Attribute names rewritten to their JSX spelling
const JSX_ATTRIBUTE_NAMES: &[(&str, &str)] = &[
    ("fill-opacity=", "fillOpacity="),
    ("xlink:href=", "xlinkHref="),
    ("clip-rule=", "clipRule="),
    ("fill-rule=", "fillRule="),
    ("stroke-width=", "strokeWidth="),
];

static SELF_CLOSING_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\S)/>").unwrap());

static CLIP_PATH_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#" clip-path="[^"]*""#).unwrap());

static EMPTY_CLIP_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:SVGChild:)?clipPath\b[^>]*/>").unwrap());

/// Clip definitions never nest, so the nearest closing tag ends the block
static CLIP_PATH_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:SVGChild:)?clipPath\b[^>]*>.*?</(?:SVGChild:)?clipPath>").unwrap()
});

static EMPTY_DEFS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:SVGChild:)?defs\b[^>]*(?:/>|></(?:SVGChild:)?defs>)").unwrap()
});

static SYNTHETIC_SELF_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<SVGChild:[^>]*/>").unwrap());

static SYNTHETIC_CLOSING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</SVGChild:([\w-]+)>").unwrap());

/// Rewrite re-rooted markup into JSX element literals
///
/// The rewrites are textual and run in a fixed order:
/// 1. a space goes before every self-closing `/>`
/// 2. kebab-case attribute names JSX knows under another name are renamed
/// 3. `clip-path` attributes are removed
/// 4. `clipPath` elements are removed with their content, and so is a
///    `defs` element they leave empty
/// 5. in multi-child mode, each top-level element is followed by `,` and
///    the whole sequence is wrapped in `[` `]`
/// 6. the synthetic name prefix is stripped
///
/// Keys are assigned before step 4, so in multi-child mode a removed clip
/// definition leaves a gap in the key sequence (`<clipPath/><path/><path/>`
/// yields keys `1` and `2`) and the list can end up with a single entry.
/// Keys stay unique but do not necessarily run from `0` to `N - 1`.
///
/// # Arguments
/// * `text` - Output of the re-rooting pass
/// * `multiple_children` - Whether the re-rooting pass promoted several children
///
/// # Examples
/// ```
/// use fig2icon::translate::translate;
///
/// assert_eq!(
///     translate(r#"<path fill-rule="evenodd" d="M0 0"/>"#, false),
///     r#"<path fillRule="evenodd" d="M0 0" />"#
/// );
/// assert_eq!(
///     translate(r#"<SVGChild:path key="0" d="M0 0"/><SVGChild:path key="1" d="M1 1"/>"#, true),
///     r#"[<path key="0" d="M0 0" />,<path key="1" d="M1 1" />,]"#
/// );
/// ```
pub fn translate(text: &str, multiple_children: bool) -> String {
    let mut out = SELF_CLOSING_END.replace_all(text, "$1 />").into_owned();
    for (kebab, camel) in JSX_ATTRIBUTE_NAMES {
        out = out.replace(kebab, camel);
    }

    let out = CLIP_PATH_ATTR.replace_all(&out, "");
    let out = EMPTY_CLIP_PATH.replace_all(&out, "");
    let out = CLIP_PATH_BLOCK.replace_all(&out, "");
    let out = EMPTY_DEFS.replace_all(&out, "");

    let out = if multiple_children {
        let out = SYNTHETIC_SELF_CLOSING.replace_all(&out, "$0,");
        let out = SYNTHETIC_CLOSING_TAG.replace_all(&out, "</$1>,");
        format!("[{out}]")
    } else {
        out.into_owned()
    };

    let out = out.replace(SYNTHETIC_PREFIX, "");
    trace!(multiple_children, len = out.len(), "translated to jsx");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_element() {
        assert_eq!(translate(r#"<path d="M0 0"/>"#, false), r#"<path d="M0 0" />"#);
    }

    #[test]
    fn test_existing_space_is_kept() {
        assert_eq!(translate(r#"<path d="M0 0" />"#, false), r#"<path d="M0 0" />"#);
    }

    #[test]
    fn test_attribute_names_are_camel_cased() {
        let out = translate(
            r##"<path fill-opacity=".5" clip-rule="evenodd" fill-rule="evenodd" stroke-width="2" d="M0 0"/><use xlink:href="#a"/>"##,
            false,
        );
        assert_eq!(
            out,
            r##"<path fillOpacity=".5" clipRule="evenodd" fillRule="evenodd" strokeWidth="2" d="M0 0" /><use xlinkHref="#a" />"##
        );
        for kebab in ["fill-opacity", "xlink:href", "clip-rule", "fill-rule", "stroke-width"] {
            assert!(!out.contains(kebab));
        }
    }

    #[test]
    fn test_clip_references_are_removed() {
        let text = r#"<g clip-path="url(#a)"><path d="M0 0"/><path d="M1 1"/></g><defs><clipPath id="a"><path d="M0 0h24v24H0z"/></clipPath></defs>"#;
        assert_eq!(
            translate(text, false),
            r#"<g><path d="M0 0" /><path d="M1 1" /></g>"#
        );
    }

    #[test]
    fn test_defs_with_other_content_are_kept() {
        let text = r#"<defs><clipPath id="a"><path d="M0 0"/></clipPath><linearGradient id="b"/></defs>"#;
        assert_eq!(translate(text, false), r#"<defs><linearGradient id="b" /></defs>"#);
    }

    #[test]
    fn test_multiple_children_with_groups() {
        let text = r#"<SVGChild:g key="0" fill="red"><path d="M0 0"/><path d="M1 1"/></SVGChild:g><SVGChild:path key="1" d="M2 2"/>"#;
        assert_eq!(
            translate(text, true),
            r#"[<g key="0" fill="red"><path d="M0 0" /><path d="M1 1" /></g>,<path key="1" d="M2 2" />,]"#
        );
    }

    #[test]
    fn test_synthetic_clip_path_child_is_removed() {
        let text = r#"<SVGChild:path key="0" clip-path="url(#a)" d="M0 0"/><SVGChild:clipPath key="1" id="a"><path d="M0 0"/></SVGChild:clipPath>"#;
        assert_eq!(translate(text, true), r#"[<path key="0" d="M0 0" />,]"#);
    }

    #[test]
    fn test_removed_clip_path_leaves_key_gap() {
        let text = r#"<SVGChild:clipPath key="0" id="a"/><SVGChild:path key="1" d="M0 0"/><SVGChild:path key="2" d="M1 1"/>"#;
        assert_eq!(
            translate(text, true),
            r#"[<path key="1" d="M0 0" />,<path key="2" d="M1 1" />,]"#
        );
    }

    #[test]
    fn test_prefix_stripped_in_single_mode() {
        assert_eq!(translate("<SVGChild:path/>", false), "<path />");
    }
}
