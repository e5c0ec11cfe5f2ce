/// Canonicalization passes applied to the parsed SVG tree
///
/// Each pass takes the whole document and rewrites it in place. They are
/// independent of each other and idempotent; the optimizer runs them in a
/// fixed order, repeatedly, until the output stops changing:
///
/// - `cleanup_attrs`: Collapse whitespace in attribute values, drop `enable-background`
/// - `remove_empty_attrs`: Drop attributes with empty values
/// - `style_to_attrs`: Inline `style` declarations, remove `style`/`script` elements
/// - `remove_metadata`: Remove titles, descriptions, editor data and unused namespaces
/// - `remove_hidden`: Remove elements that do not render
/// - `shapes_to_path`: Convert basic shapes to `path`
/// - `path_data`: Shortest path data at a fixed precision
/// - `transforms`: Shortest transform lists, folded into paths when possible
/// - `merge_paths`: Merge adjacent compatible paths
/// - `colors`: Shortest colors and `currentColor` adoption
/// - `remove_attrs`: Remove attributes by name pattern
/// - `remove_defaults`: Remove default values and unreferenced ids
/// - `useless_stroke_fill`: Remove paint attributes that paint nothing
/// - `numeric_values`: Round numeric attributes
/// - `group_attrs`: Move attributes between groups and their children
/// - `collapse_groups`: Unwrap useless groups
/// - `remove_dimensions`: Drop the root `width` / `height`
/// - `remove_elements_by_attr`: Remove elements by id or class
/// - `remove_empty_containers`: Remove containers left empty
/// - `sort_attrs`: Stable attribute order
pub mod cleanup_attrs;
pub mod collapse_groups;
pub mod colors;
pub mod group_attrs;
pub mod merge_paths;
pub mod numeric_values;
pub mod path_data;
pub mod remove_attrs;
pub mod remove_defaults;
pub mod remove_dimensions;
pub mod remove_elements_by_attr;
pub mod remove_empty_attrs;
pub mod remove_empty_containers;
pub mod remove_hidden;
pub mod remove_metadata;
pub mod shapes_to_path;
pub mod sort_attrs;
pub mod style_to_attrs;
pub mod transforms;
pub mod useless_stroke_fill;

// Re-export commonly used functions
pub use cleanup_attrs::cleanup_attrs;
pub use collapse_groups::collapse_groups;
pub use colors::convert_colors;
pub use group_attrs::{
    move_elems_attrs_to_group, move_group_attrs_to_elems, remove_non_inheritable_group_attrs,
};
pub use merge_paths::merge_paths;
pub use numeric_values::cleanup_numeric_values;
pub use path_data::convert_path_data;
pub use remove_attrs::remove_attrs;
pub use remove_defaults::remove_defaults;
pub use remove_dimensions::remove_dimensions;
pub use remove_elements_by_attr::remove_elements_by_attr;
pub use remove_empty_attrs::remove_empty_attrs;
pub use remove_empty_containers::remove_empty_containers;
pub use remove_hidden::remove_hidden;
pub use remove_metadata::remove_metadata;
pub use shapes_to_path::shapes_to_path;
pub use sort_attrs::sort_attrs;
pub use style_to_attrs::{convert_style_to_attrs, remove_style_elements};
pub use transforms::convert_transforms;
pub use useless_stroke_fill::remove_useless_stroke_and_fill;
