pub mod attributes;
pub mod inherited;
pub mod matrix;
pub mod numbers;
pub mod path;
pub mod transformations;

use crate::error::{Result, Stage};
use crate::parser::{parse_document, serialize_document};
use crate::types::{Document, OptimizeOptions};
use tracing::{debug, trace};
use transformations::*;

/// A named step of the canonicalization pipeline
struct Pass<'a> {
    name: &'static str,
    run: Box<dyn Fn(&mut Document) -> Result<()> + 'a>,
}

fn pass<'a>(name: &'static str, run: impl Fn(&mut Document) -> Result<()> + 'a) -> Pass<'a> {
    Pass {
        name,
        run: Box::new(run),
    }
}

/// Build the ordered pipeline for the given options
///
/// Order matters: each group of passes exposes simplifications to the
/// following ones (shapes must be paths before they can merge, defaults
/// must be gone before groups look attribute-free, and so on).
fn pipeline(options: &OptimizeOptions) -> Vec<Pass<'_>> {
    let precision = options.float_precision;
    vec![
        // Attribute normalization
        pass("cleanup_attrs", cleanup_attrs),
        pass("remove_empty_attrs", remove_empty_attrs),
        pass("convert_style_to_attrs", convert_style_to_attrs),
        pass("remove_style_elements", remove_style_elements),
        // Metadata and visibility
        pass("remove_metadata", remove_metadata),
        pass("remove_hidden", remove_hidden),
        // Geometry
        pass("shapes_to_path", shapes_to_path),
        pass("convert_path_data", move |doc| convert_path_data(doc, precision)),
        pass("convert_transforms", move |doc| convert_transforms(doc, precision)),
        pass("merge_paths", move |doc| merge_paths(doc, precision)),
        // Color and opacity
        pass("convert_colors", move |doc| convert_colors(doc, options.current_color)),
        pass("remove_attrs", move |doc| remove_attrs(doc, &options.remove_attr_patterns)),
        pass("remove_defaults", remove_defaults),
        pass("remove_useless_stroke_and_fill", |doc| {
            remove_useless_stroke_and_fill(doc, true)
        }),
        pass("cleanup_numeric_values", move |doc| cleanup_numeric_values(doc, precision)),
        // Structure
        pass("move_elems_attrs_to_group", move_elems_attrs_to_group),
        pass("move_group_attrs_to_elems", move_group_attrs_to_elems),
        pass("remove_non_inheritable_group_attrs", remove_non_inheritable_group_attrs),
        pass("collapse_groups", collapse_groups),
        // Cosmetics
        pass("remove_dimensions", remove_dimensions),
        pass("remove_elements_by_attr", move |doc| {
            remove_elements_by_attr(
                doc,
                &options.remove_elements_by_id,
                &options.remove_elements_by_class,
            )
        }),
        pass("remove_empty_containers", remove_empty_containers),
        pass("sort_attrs", sort_attrs),
    ]
}

/// Optimize SVG markup into its canonical minimal form
///
/// The markup is parsed once, then the whole pipeline runs over the tree
/// until the serialized output stops changing. With `multipass` disabled,
/// or once `max_passes` is reached, the current tree is returned as is.
///
/// # Arguments
/// * `text` - Scrubbed SVG markup
/// * `options` - Precision, multipass and preset options
///
/// # Returns
/// * `Ok(String)` - Minimal serialized SVG
/// * `Err(IconError::Parse)` - If the markup is not well-formed
/// * `Err(IconError::InvalidPattern)` - If an attribute pattern is not a valid regex
///
/// # Examples
/// ```
/// use fig2icon::optimizer::optimize;
/// use fig2icon::types::OptimizeOptions;
///
/// let svg = r#"<svg width="24" height="24" viewBox="0 0 24 24">
///   <title>home</title>
///   <g><rect x="2" y="2" width="4" height="4" fill-opacity=".5"/></g>
/// </svg>"#;
/// let out = optimize(svg, &OptimizeOptions::default()).unwrap();
/// assert_eq!(out, r#"<svg viewBox="0 0 24 24"><path d="M2 2h4v4H2z"/></svg>"#);
/// ```
pub fn optimize(text: &str, options: &OptimizeOptions) -> Result<String> {
    let mut doc = parse_document(text, Stage::Optimize)?;
    let pipeline = pipeline(options);
    let max_passes = if options.multipass {
        options.max_passes.max(1)
    } else {
        1
    };

    let mut output = serialize_document(&doc);
    for pass in 1..=max_passes {
        for step in &pipeline {
            trace!(pass, step = step.name, "running optimizer step");
            (step.run)(&mut doc)?;
        }

        let next = serialize_document(&doc);
        let stable = next == output;
        debug!(pass, bytes = next.len(), stable, "optimizer pass done");
        output = next;
        if stable {
            break;
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> String {
        optimize(text, &OptimizeOptions::default()).unwrap()
    }

    #[test]
    fn test_single_path_untouched() {
        assert_eq!(run(r#"<svg><path d="M0 0"/></svg>"#), r#"<svg><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn test_strips_metadata_and_dimensions() {
        let svg = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Generator: exporter -->
<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="24px" height="24px" viewBox="0 0 24 24">
  <desc>icon</desc>
  <path d="M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z"/>
</svg>"#;
        assert_eq!(
            run(svg),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z"/></svg>"#
        );
    }

    #[test]
    fn test_colors_become_current_color() {
        assert_eq!(
            run(r##"<svg><path fill="#ff0000" stroke="#000" stroke-width="2" d="M0 0h4"/></svg>"##),
            r#"<svg><path fill="currentColor" stroke="currentColor" stroke-width="2" d="M0 0h4"/></svg>"#
        );
    }

    #[test]
    fn test_group_transform_is_folded_into_path() {
        assert_eq!(
            run(r#"<svg><g transform="translate(2 2)"><path d="M0 0h2v2H0z"/></g></svg>"#),
            r#"<svg><path d="M2 2h2v2H2z"/></svg>"#
        );
    }

    #[test]
    fn test_single_pass_without_multipass() {
        let options = OptimizeOptions {
            multipass: false,
            ..OptimizeOptions::default()
        };
        let out = optimize(r#"<svg><g><g><path d="M0 0"/></g></g></svg>"#, &options).unwrap();
        assert_eq!(out, r#"<svg><path d="M0 0"/></svg>"#);
    }

    #[test]
    fn test_malformed_markup() {
        let err = optimize("<svg><path></svg>", &OptimizeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::IconError::Parse { stage: Stage::Optimize, .. }
        ));
    }

    #[test]
    fn test_invalid_attribute_pattern() {
        let options = OptimizeOptions {
            remove_attr_patterns: vec!["[".to_string()],
            ..OptimizeOptions::default()
        };
        let err = optimize("<svg/>", &options).unwrap_err();
        assert!(matches!(err, crate::error::IconError::InvalidPattern { .. }));
    }

    #[test]
    fn test_output_is_a_fixed_point() {
        let inputs = [
            include_str!("../../tests/fixtures/home_icon.svg"),
            include_str!("../../tests/fixtures/complex_icon.svg"),
            r##"<svg viewBox="0 0 24 24">
  <g transform="rotate(30 12 12)">
    <rect x="2" y="2" width="4" height="4" stroke="#000" stroke-linecap="round"/>
    <circle cx="12" cy="12" r="3"/>
  </g>
  <g transform="translate(2 2) scale(.5)"><path d="M0 0h8v8H0z"/><path d="M20 20h8v8h-8z"/></g>
  <path transform="matrix(1 0 .5 1 0 0)" stroke="red" stroke-linecap="square" d="M1 1l0 0M6 6l0 0"/>
</svg>"##,
        ];
        for input in inputs {
            let once = run(input);
            assert_eq!(run(&once), once);
        }
    }
}
