//! SVG renderer for tree layouts
//!
//! Turns a `TreeLayout` into an SVG string: edges first, then one labelled
//! circle per node, inside a padded view box.

pub mod config;
pub mod svg;

pub use config::{ConfigError, SvgConfig};
pub use svg::{render_placeholder, render_svg, SvgBuilder, ViewBox};
