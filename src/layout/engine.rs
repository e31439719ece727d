//! Geometry pass: assigns raw positions to every node
//!
//! Each subtree is laid out left to right. A node is centered over the span
//! of its left subtree and its right subtree starts where the left one ends,
//! so sibling subtrees never share horizontal space. Every subtree reserves
//! at least `MIN_SIBLING_GAP`, which keeps leaves apart.
//!
//! The pass is a post-order walk driven by an explicit stack, so a chain of
//! any length is laid out without growing the call stack.

use tracing::{debug, instrument, warn};

use crate::tree::TreeNode;

use super::config::{LEVEL_SPACING, MIN_SIBLING_GAP};
use super::types::{Layout, PositionedNode, PositionedTree, SubtreeExtent};
use super::LayoutError;

/// A finished subtree: its positioned nodes and reserved extent
struct Placed {
    node: PositionedNode,
    extent: SubtreeExtent,
}

enum Step<'a> {
    /// Start a subtree whose leftmost reservation begins at `x`
    Enter {
        node: &'a TreeNode,
        x: f64,
        depth: usize,
    },
    /// Left subtree finished; place the node and start the right subtree
    AfterLeft {
        node: &'a TreeNode,
        x: f64,
        depth: usize,
    },
    /// Both subtrees finished; fold their extents
    Finish {
        node: &'a TreeNode,
        depth: usize,
        node_x: f64,
        right_start_x: f64,
        left: Option<Placed>,
    },
}

/// Lay out a tree starting at the origin.
///
/// Returns `Layout::Empty` for an absent root. The input is only read; the
/// result is a fresh positioned copy plus its raw (uncentered) bounds.
#[instrument(level = "debug", skip_all)]
pub fn layout(root: Option<&TreeNode>) -> Result<Layout, LayoutError> {
    let Some(root) = root else {
        debug!("empty tree, nothing to lay out");
        return Ok(Layout::Empty);
    };

    let placed = assign_positions(root, 0.0);
    let tree = PositionedTree::from_root(placed.node).inspect_err(|e| {
        warn!(error = %e, "layout produced invalid coordinates");
    })?;

    debug!(
        nodes = tree.root.node_count(),
        levels = tree.levels,
        min_x = tree.bounds.min_x,
        max_x = tree.bounds.max_x,
        width = placed.extent.width,
        "assigned positions"
    );
    Ok(Layout::Positioned(tree))
}

/// Post-order pass that positions `root` with its reservation starting at `x`
fn assign_positions(root: &TreeNode, x: f64) -> Placed {
    let mut steps = vec![Step::Enter {
        node: root,
        x,
        depth: 0,
    }];
    // Finished subtrees; `None` marks an absent child
    let mut done: Vec<Option<Placed>> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter { node, x, depth } => {
                steps.push(Step::AfterLeft { node, x, depth });
                match node.left.as_deref() {
                    Some(left) => steps.push(Step::Enter {
                        node: left,
                        x,
                        depth: depth + 1,
                    }),
                    None => done.push(None),
                }
            }
            Step::AfterLeft { node, x, depth } => {
                let left = done.pop().flatten();
                let (node_x, right_start_x) = match &left {
                    Some(left) => {
                        let extent = left.extent;
                        (extent.next_x - extent.width / 2.0, extent.next_x)
                    }
                    // No left subtree: sit at x and push the right child over
                    None => (x, x + MIN_SIBLING_GAP),
                };
                steps.push(Step::Finish {
                    node,
                    depth,
                    node_x,
                    right_start_x,
                    left,
                });
                match node.right.as_deref() {
                    Some(right) => steps.push(Step::Enter {
                        node: right,
                        x: right_start_x,
                        depth: depth + 1,
                    }),
                    None => done.push(None),
                }
            }
            Step::Finish {
                node,
                depth,
                node_x,
                right_start_x,
                left,
            } => {
                let right = done.pop().flatten();
                let extent = fold_extents(
                    node_x,
                    right_start_x,
                    left.as_ref().map(|p| p.extent),
                    right.as_ref().map(|p| p.extent),
                );
                let positioned = PositionedNode {
                    value: node.value,
                    x: node_x,
                    y: depth as f64 * LEVEL_SPACING,
                    depth,
                    left: left.map(|p| Box::new(p.node)),
                    right: right.map(|p| Box::new(p.node)),
                };
                done.push(Some(Placed {
                    node: positioned,
                    extent,
                }));
            }
        }
    }

    match done.pop().flatten() {
        Some(placed) => placed,
        None => unreachable!("post-order pass always finishes the root"),
    }
}

/// Combine child extents into the extent of their parent
fn fold_extents(
    node_x: f64,
    right_start_x: f64,
    left: Option<SubtreeExtent>,
    right: Option<SubtreeExtent>,
) -> SubtreeExtent {
    let left_extent = left.unwrap_or(SubtreeExtent::empty(node_x));
    let right_extent = right.unwrap_or(SubtreeExtent::empty(right_start_x));
    let width = (left_extent.width + right_extent.width).max(MIN_SIBLING_GAP);

    let next_x = match (left, right) {
        (_, Some(right)) => right.next_x.max(right_start_x + right.width),
        (Some(left), None) => left.next_x + MIN_SIBLING_GAP,
        (None, None) => node_x + MIN_SIBLING_GAP,
    };

    SubtreeExtent { width, next_x }
}
