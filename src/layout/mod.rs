//! Layout engine for binary search trees
//!
//! The geometry pass (`engine`) gives every node a raw position; the
//! normalizer (`normalize`) centers the result and derives the view frame.
//! Both are pure: each call builds a fresh positioned tree and touches no
//! shared state.

pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod types;

pub use config::{LEVEL_SPACING, MIN_FRAME_WIDTH, MIN_SIBLING_GAP, NODE_RADIUS};
pub use engine::layout;
pub use error::{LayoutError, LayoutStage};
pub use normalize::normalize;
pub use types::*;

use tracing::instrument;

use crate::tree::TreeNode;

/// Run the geometry pass and normalization.
///
/// Returns `Ok(None)` for an empty tree.
#[instrument(level = "debug", skip_all)]
pub fn compute(root: Option<&TreeNode>) -> Result<Option<TreeLayout>, LayoutError> {
    match layout(root)? {
        Layout::Empty => Ok(None),
        Layout::Positioned(tree) => normalize(tree).map(Some),
    }
}
