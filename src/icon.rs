use crate::error::{IconError, Result};
use crate::optimizer::optimize;
use crate::reroot::reroot;
use crate::scrub::scrub_literals;
use crate::translate::translate;
use crate::types::OptimizeOptions;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// JSX paths produced from one SVG document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPaths {
    /// A single element literal, or a list literal of keyed elements
    pub paths: String,
    /// Whether `paths` is a list literal
    pub multiple_children: bool,
}

/// Run the whole pipeline with the given optimizer options
///
/// Scrubs the export literals, optimizes, promotes the children of the
/// `svg` root, then rewrites the result into JSX.
pub fn optimise_svg_paths(svg: &str, options: &OptimizeOptions) -> Result<IconPaths> {
    let scrubbed = scrub_literals(svg);
    let optimized = optimize(&scrubbed, options)?;
    debug!(input = svg.len(), optimized = optimized.len(), "optimized svg");

    let rerooted = reroot(&optimized)?;
    let paths = translate(&rerooted.text, rerooted.multiple_children);
    Ok(IconPaths {
        paths,
        multiple_children: rerooted.multiple_children,
    })
}

/// Turn an SVG icon into minimal JSX path literals
///
/// Uses the default icon preset (see [`OptimizeOptions`]).
///
/// # Arguments
/// * `svg` - Raw SVG markup, as exported
///
/// # Returns
/// * `Ok(String)` - A `<path ... />` literal, or `[<path key="0" ... />,...]`
///   when the icon has several top-level shapes
/// * `Err(IconError::Parse)` - If the markup is not well-formed
/// * `Err(IconError::RootShape)` - If the document is not a single `svg`
///
/// # Examples
/// ```
/// use fig2icon::get_optimised_svg_paths;
///
/// let paths = get_optimised_svg_paths(r##"<svg><path fill="#010101" d="M0 0"/></svg>"##).unwrap();
/// assert_eq!(paths, r#"<path d="M0 0" />"#);
/// ```
pub fn get_optimised_svg_paths(svg: &str) -> Result<String> {
    Ok(optimise_svg_paths(svg, &OptimizeOptions::default())?.paths)
}

/// A generated MUI icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSnippet {
    /// Display name passed to `createSvgIcon`
    pub name: String,
    /// JSX given as the icon content
    pub paths: String,
    pub multiple_children: bool,
}

impl IconSnippet {
    /// Render the icon as a source module default-exporting the component
    ///
    /// # Examples
    /// ```
    /// use fig2icon::IconSnippet;
    ///
    /// let snippet = IconSnippet {
    ///     name: "Home".to_string(),
    ///     paths: r#"<path d="M0 0" />"#.to_string(),
    ///     multiple_children: false,
    /// };
    /// assert_eq!(
    ///     snippet.to_module(),
    ///     "import { createSvgIcon } from '@mui/material';\n\n\
    ///      export default createSvgIcon(\n  <path d=\"M0 0\" />,\n  'Home'\n);\n"
    /// );
    /// ```
    pub fn to_module(&self) -> String {
        format!(
            "import {{ createSvgIcon }} from '@mui/material';\n\n\
             export default createSvgIcon(\n  {},\n  '{}'\n);\n",
            self.paths,
            escape_single_quoted(&self.name)
        )
    }
}

/// Escape a name for use inside a single-quoted string literal
fn escape_single_quoted(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Convert an SVG icon into an [`IconSnippet`] with the default preset
pub fn convert(svg: &str, name: &str) -> Result<IconSnippet> {
    convert_with_options(svg, name, &OptimizeOptions::default())
}

/// Convert an SVG icon into an [`IconSnippet`]
///
/// # Returns
/// * `Ok(IconSnippet)` - The icon name with its JSX paths
/// * `Err(IconError::EmptyDocument)` - If `svg` is blank
/// * `Err(IconError::Parse)` / `Err(IconError::RootShape)` - As for [`get_optimised_svg_paths`]
pub fn convert_with_options(svg: &str, name: &str, options: &OptimizeOptions) -> Result<IconSnippet> {
    if svg.trim().is_empty() {
        return Err(IconError::EmptyDocument(name.to_string()));
    }

    let IconPaths {
        paths,
        multiple_children,
    } = optimise_svg_paths(svg, options)?;
    debug!(name, multiple_children, "converted icon");
    Ok(IconSnippet {
        name: name.to_string(),
        paths,
        multiple_children,
    })
}

/// Read an SVG document from disk
pub fn read_svg(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}
