//! Core types for the layout engine

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;

use super::error::{LayoutError, LayoutStage};

/// A tree node with its assigned position
///
/// Produced fresh by every layout call; `y` is `depth * LEVEL_SPACING`.
///
/// Serializes as a flat pre-order list of node records, each child naming its
/// parent by list index, so the output nesting stays constant for any height.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub value: i64,
    pub x: f64,
    pub y: f64,
    pub depth: usize,
    pub left: Option<Box<PositionedNode>>,
    pub right: Option<Box<PositionedNode>>,
}

/// Child slot a serialized node occupies under its parent
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Side {
    Left,
    Right,
}

#[derive(Serialize)]
struct NodeRecord {
    value: i64,
    x: f64,
    y: f64,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<Side>,
}

impl Serialize for PositionedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.node_count()))?;
        let mut stack: Vec<(&PositionedNode, Option<(usize, Side)>)> = vec![(self, None)];
        let mut index = 0;
        while let Some((node, link)) = stack.pop() {
            seq.serialize_element(&NodeRecord {
                value: node.value,
                x: node.x,
                y: node.y,
                depth: node.depth,
                parent: link.map(|(parent, _)| parent),
                side: link.map(|(_, side)| side),
            })?;
            if let Some(right) = node.right.as_deref() {
                stack.push((right, Some((index, Side::Right))));
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, Some((index, Side::Left))));
            }
            index += 1;
        }
        seq.end()
    }
}

impl PositionedNode {
    /// Pre-order iterator over the nodes of this subtree
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Direct children, left first
    pub fn children(&self) -> impl Iterator<Item = &PositionedNode> {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of depth levels below and including this node
    pub fn levels(&self) -> usize {
        self.iter()
            .map(|node| node.depth)
            .max()
            .map_or(0, |deepest| deepest + 1 - self.depth)
    }

    /// Find the node holding `value`
    pub fn find(&self, value: i64) -> Option<&PositionedNode> {
        self.iter().find(|node| node.value == value)
    }

    /// Scan the horizontal extent of the subtree.
    ///
    /// Every coordinate must be finite; a NaN or infinite `x`/`y` is reported
    /// as an integrity error for `stage`.
    pub fn bounds(&self, stage: LayoutStage) -> Result<HorizontalBounds, LayoutError> {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for node in self.iter() {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(LayoutError::non_finite_coordinate(stage, node));
            }
            min_x = min_x.min(node.x);
            max_x = max_x.max(node.x);
        }
        let bounds = HorizontalBounds { min_x, max_x };
        bounds.validate(stage)?;
        Ok(bounds)
    }

    /// Add `offset` to every `x` in the subtree
    pub(crate) fn shift_x(&mut self, offset: f64) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            let PositionedNode { x, left, right, .. } = node;
            *x += offset;
            if let Some(right) = right.as_deref_mut() {
                stack.push(right);
            }
            if let Some(left) = left.as_deref_mut() {
                stack.push(left);
            }
        }
    }
}

impl Drop for PositionedNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<PositionedNode>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Pre-order iterator over a `PositionedNode` subtree
pub struct Iter<'a> {
    stack: Vec<&'a PositionedNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PositionedNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some(node)
    }
}

/// Horizontal footprint of a subtree during the layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SubtreeExtent {
    /// Width reserved by the subtree
    pub width: f64,
    /// First x a right-hand sibling may start at
    pub next_x: f64,
}

impl SubtreeExtent {
    /// Extent of an absent subtree starting at `x`
    pub fn empty(x: f64) -> Self {
        Self { width: 0.0, next_x: x }
    }
}

/// Minimum and maximum node `x` of a tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalBounds {
    pub min_x: f64,
    pub max_x: f64,
}

impl HorizontalBounds {
    /// Distance between the outermost node centers
    pub fn span(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Check that both ends are finite and ordered
    pub fn validate(&self, stage: LayoutStage) -> Result<(), LayoutError> {
        if !self.min_x.is_finite() || !self.max_x.is_finite() {
            return Err(LayoutError::non_finite_bounds(stage, *self));
        }
        if self.min_x > self.max_x {
            return Err(LayoutError::inverted_bounds(stage, *self));
        }
        Ok(())
    }
}

/// Output of the geometry pass, before centering
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedTree {
    pub root: PositionedNode,
    /// Raw horizontal bounds of `root`
    pub bounds: HorizontalBounds,
    /// Number of depth levels
    pub levels: usize,
}

impl PositionedTree {
    /// Wrap an already positioned tree, scanning its bounds and depth
    pub fn from_root(root: PositionedNode) -> Result<Self, LayoutError> {
        let bounds = root.bounds(LayoutStage::Layout)?;
        let levels = root.levels();
        Ok(Self {
            root,
            bounds,
            levels,
        })
    }
}

/// Result of the geometry pass
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// The tree has no nodes; consumers show an empty-state placeholder
    Empty,
    Positioned(PositionedTree),
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        matches!(self, Layout::Empty)
    }

    pub fn into_positioned(self) -> Option<PositionedTree> {
        match self {
            Layout::Empty => None,
            Layout::Positioned(tree) => Some(tree),
        }
    }
}

/// Final bounding geometry, padded by the node radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewFrame {
    pub min_x: f64,
    pub max_x: f64,
    /// `max(max_x - min_x, MIN_FRAME_WIDTH)`
    pub width: f64,
    /// `levels * LEVEL_SPACING`
    pub height: f64,
}

impl ViewFrame {
    /// Horizontal midpoint of the frame
    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }
}

/// A centered tree together with its view frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeLayout {
    #[serde(rename = "nodes")]
    pub root: PositionedNode,
    pub frame: ViewFrame,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: i64, x: f64, depth: usize) -> PositionedNode {
        PositionedNode {
            value,
            x,
            y: depth as f64 * 100.0,
            depth,
            left: None,
            right: None,
        }
    }

    fn sample() -> PositionedNode {
        let mut root = node(2, 0.0, 0);
        root.left = Some(Box::new(node(1, -40.0, 1)));
        root.right = Some(Box::new(node(3, 40.0, 1)));
        root
    }

    #[test]
    fn test_bounds_scan() {
        let bounds = sample().bounds(LayoutStage::Layout).unwrap();
        assert_eq!(bounds, HorizontalBounds { min_x: -40.0, max_x: 40.0 });
        assert_eq!(bounds.span(), 80.0);
    }

    #[test]
    fn test_bounds_rejects_nan() {
        let mut root = sample();
        root.right.as_deref_mut().unwrap().x = f64::NAN;
        let err = root.bounds(LayoutStage::Normalized).unwrap_err();
        assert!(matches!(err, LayoutError::NonFiniteCoordinate { value: 3, .. }));
    }

    #[test]
    fn test_validate_inverted() {
        let bounds = HorizontalBounds { min_x: 5.0, max_x: -5.0 };
        assert!(matches!(
            bounds.validate(LayoutStage::Centering),
            Err(LayoutError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_shift_x() {
        let mut root = sample();
        root.shift_x(10.0);
        let xs: Vec<f64> = root.iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![10.0, -30.0, 50.0]);
    }

    #[test]
    fn test_levels_and_find() {
        let root = sample();
        assert_eq!(root.levels(), 2);
        assert_eq!(root.node_count(), 3);
        assert_eq!(root.find(3).map(|n| n.x), Some(40.0));
        assert!(root.find(9).is_none());
        let children: Vec<i64> = root.children().map(|n| n.value).collect();
        assert_eq!(children, vec![1, 3]);
    }

    #[test]
    fn test_serializes_as_flat_records() {
        let value = serde_json::to_value(sample()).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["value"], 2);
        assert!(records[0].get("parent").is_none());
        assert_eq!(records[1]["value"], 1);
        assert_eq!(records[1]["parent"], 0);
        assert_eq!(records[1]["side"], "left");
        assert_eq!(records[2]["value"], 3);
        assert_eq!(records[2]["side"], "right");
        assert_eq!(records[2]["x"], 40.0);
    }

    #[test]
    fn test_serializing_deep_chain_does_not_overflow() {
        let mut root = node(0, 0.0, 150_000);
        for depth in (0..150_000).rev() {
            let mut parent = node(depth as i64 + 1, 0.0, depth);
            parent.left = Some(Box::new(root));
            root = parent;
        }
        let json = serde_json::to_string(&root).unwrap();
        assert_eq!(json.matches(r#""side":"left""#).count(), 150_000);
    }

    #[test]
    fn test_from_root() {
        let tree = PositionedTree::from_root(sample()).unwrap();
        assert_eq!(tree.levels, 2);
        assert_eq!(tree.bounds.min_x, -40.0);
    }
}
