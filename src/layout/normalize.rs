//! Frame normalization: centers a positioned tree on x = 0 and derives the
//! view frame that encloses it.

use tracing::{debug, warn};

use super::config::{LEVEL_SPACING, MIN_FRAME_WIDTH, NODE_RADIUS};
use super::error::{LayoutError, LayoutStage};
use super::types::{HorizontalBounds, PositionedTree, TreeLayout, ViewFrame};

/// Center `tree` horizontally and compute its view frame.
///
/// The raw bounds carried by `tree` decide the offset; the shifted tree is
/// re-scanned before the frame is built. A tree whose nodes all share one
/// x is left where it is.
pub fn normalize(tree: PositionedTree) -> Result<TreeLayout, LayoutError> {
    let PositionedTree {
        mut root,
        bounds,
        levels,
    } = tree;

    bounds.validate(LayoutStage::Centering).inspect_err(|e| {
        warn!(error = %e, "refusing to center tree");
    })?;

    let offset = center_offset(bounds);
    if offset != 0.0 {
        root.shift_x(offset);
    }

    let final_bounds = root.bounds(LayoutStage::Normalized).inspect_err(|e| {
        warn!(error = %e, "centered tree has invalid coordinates");
    })?;
    let frame = view_frame(final_bounds, levels);

    debug!(
        offset,
        min_x = frame.min_x,
        max_x = frame.max_x,
        width = frame.width,
        height = frame.height,
        "normalized frame"
    );
    Ok(TreeLayout { root, frame })
}

/// Offset that moves the middle of `bounds` onto x = 0
fn center_offset(bounds: HorizontalBounds) -> f64 {
    let span = bounds.span();
    if span > 0.0 {
        -bounds.min_x - span / 2.0
    } else {
        0.0
    }
}

fn view_frame(bounds: HorizontalBounds, levels: usize) -> ViewFrame {
    ViewFrame {
        min_x: bounds.min_x - NODE_RADIUS,
        max_x: bounds.max_x + NODE_RADIUS,
        width: (bounds.span() + 2.0 * NODE_RADIUS).max(MIN_FRAME_WIDTH),
        height: levels as f64 * LEVEL_SPACING,
    }
}
