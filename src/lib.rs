//! # fig2icon
//!
//! A library for turning exported SVG icons into minimal JSX `path` literals,
//! ready to be passed to MUI's `createSvgIcon`.
//!
//! The conversion is a linear pipeline of four stages, each consuming the
//! text produced by the previous one:
//!
//! 1. [`scrub::scrub_literals`] removes known export artifacts
//! 2. [`optimizer::optimize`] canonicalizes the document until it is stable
//! 3. [`reroot::reroot`] promotes the children of the `svg` root
//! 4. [`translate::translate`] rewrites the markup into JSX
//!
//! ## Example
//!
//! ```
//! use fig2icon::convert;
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
//!   <path fill-rule="evenodd" d="M2 2h4v4H2z"/>
//! </svg>"#;
//!
//! let snippet = convert(svg, "Square").unwrap();
//! assert_eq!(snippet.paths, r#"<path fillRule="evenodd" d="M2 2h4v4H2z" />"#);
//! println!("{}", snippet.to_module());
//! ```

pub mod error;
pub mod icon;
pub mod optimizer;
pub mod parser;
pub mod reroot;
pub mod scrub;
pub mod translate;
pub mod types;

// Re-export commonly used items
pub use error::{IconError, Result};
pub use icon::{convert, convert_with_options, get_optimised_svg_paths, read_svg, IconSnippet};
pub use types::OptimizeOptions;
