//! BST Layout - non-overlapping drawings of binary search trees
//!
//! This library lays out a binary tree shape, centers it inside a view
//! frame, and renders the result as SVG circles joined by edges.
//!
//! # Example
//!
//! ```rust
//! use bst_layout::{render, TreeNode};
//!
//! let root = TreeNode::from_insertions([10, 5, 3]);
//! let svg = render(root.as_ref()).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod error;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod tree;

pub use error::InputError;
pub use input::{load_tree, parse_tree, read_tree};
pub use layout::{compute, LayoutError, TreeLayout, ViewFrame};
pub use renderer::{render_placeholder, render_svg, ConfigError, SvgConfig};
pub use tree::TreeNode;

use thiserror::Error;
use tracing::{instrument, trace};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error while reading the tree shape
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Layout integrity failure
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Value whose node is drawn highlighted
    pub highlight: Option<i64>,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Highlight the node holding `value`
    pub fn with_highlight(mut self, value: Option<i64>) -> Self {
        self.highlight = value;
        self
    }
}

/// Render a tree to SVG with default configuration
///
/// An empty tree renders the empty-state placeholder.
pub fn render(tree: Option<&TreeNode>) -> Result<String, RenderError> {
    render_with_config(tree, &RenderConfig::default())
}

/// Render a JSON tree document to SVG with default configuration
///
/// # Example
///
/// ```rust
/// use bst_layout::render_json;
///
/// let svg = render_json(r#"{"value": 2, "left": {"value": 1}, "right": {"value": 3}}"#).unwrap();
/// assert_eq!(svg.matches("<circle").count(), 3);
/// ```
pub fn render_json(source: &str) -> Result<String, RenderError> {
    let tree = parse_tree(source)?;
    render(tree.as_ref())
}

/// Render a tree to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use bst_layout::{render_with_config, RenderConfig, SvgConfig, TreeNode};
///
/// let config = RenderConfig::new()
///     .with_highlight(Some(5))
///     .with_svg(SvgConfig::default().with_viewbox_padding(10.0));
///
/// let root = TreeNode::from_insertions([10, 5, 15]);
/// let svg = render_with_config(root.as_ref(), &config).unwrap();
/// assert!(svg.contains("bst-highlight"));
/// ```
#[instrument(level = "debug", skip_all)]
pub fn render_with_config(
    tree: Option<&TreeNode>,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let layout = compute(tree)?;

    if let Some(layout) = &layout {
        for node in layout.root.iter() {
            trace!(value = node.value, x = node.x, y = node.y, "node position");
        }
    }

    Ok(render_svg(layout.as_ref(), &config.svg, config.highlight))
}
