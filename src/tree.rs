//! Input tree shape
//!
//! A `TreeNode` is the read-only shape handed to the layout engine: a value
//! and up to two exclusively owned children. There are no parent links, so a
//! cycle cannot be expressed.

use std::cmp::Ordering;

use serde::Deserialize;

/// A binary tree node as delivered by the tree service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeNode {
    pub value: i64,
    #[serde(default)]
    pub left: Option<Box<TreeNode>>,
    #[serde(default)]
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Create a node with the given children
    pub fn new(value: i64, left: Option<TreeNode>, right: Option<TreeNode>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// Create a childless node
    pub fn leaf(value: i64) -> Self {
        Self::new(value, None, None)
    }

    /// Set the left child
    pub fn with_left(mut self, child: TreeNode) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    /// Set the right child
    pub fn with_right(mut self, child: TreeNode) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    /// Build an unbalanced binary search tree by inserting values in order.
    ///
    /// Duplicate values are skipped. Returns `None` when no value was given.
    pub fn from_insertions<I>(values: I) -> Option<TreeNode>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut root: Option<Box<TreeNode>> = None;
        for value in values {
            insert(&mut root, value);
        }
        root.map(|node| *node)
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of depth levels in this subtree (a leaf has one level)
    pub fn levels(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, level + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, level + 1));
            }
        }
        deepest
    }

    /// Pre-order iterator over the nodes of this subtree
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }
}

fn insert(root: &mut Option<Box<TreeNode>>, value: i64) -> bool {
    let mut slot = root;
    while let Some(node) = slot {
        slot = match value.cmp(&node.value) {
            Ordering::Less => &mut node.left,
            Ordering::Greater => &mut node.right,
            Ordering::Equal => return false,
        };
    }
    *slot = Some(Box::new(TreeNode::leaf(value)));
    true
}

// Unlinks children onto a heap stack so long chains do not recurse on drop.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = Vec::new();
        pending.extend(self.left.take());
        pending.extend(self.right.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

/// Pre-order iterator over a `TreeNode` subtree
pub struct Iter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TreeNode;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_insertions_left_chain() {
        let root = TreeNode::from_insertions([10, 5, 3]).unwrap();
        assert_eq!(root.value, 10);
        let five = root.left.as_deref().unwrap();
        assert_eq!(five.value, 5);
        assert_eq!(five.left.as_deref().unwrap().value, 3);
        assert!(root.right.is_none());
        assert_eq!(root.levels(), 3);
    }

    #[test]
    fn test_from_insertions_skips_duplicates() {
        let root = TreeNode::from_insertions([4, 2, 6, 2, 4]).unwrap();
        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn test_from_insertions_empty() {
        assert!(TreeNode::from_insertions(Vec::new()).is_none());
    }

    #[test]
    fn test_iter_is_preorder() {
        let root = TreeNode::from_insertions([8, 4, 12, 2, 6, 10]).unwrap();
        let values: Vec<i64> = root.iter().map(|n| n.value).collect();
        assert_eq!(values, vec![8, 4, 2, 6, 12, 10]);
    }

    #[test]
    fn test_builders() {
        let root = TreeNode::leaf(2)
            .with_left(TreeNode::leaf(1))
            .with_right(TreeNode::leaf(3));
        assert_eq!(root, TreeNode::new(2, Some(TreeNode::leaf(1)), Some(TreeNode::leaf(3))));
        assert_eq!(root.levels(), 2);
    }

    #[test]
    fn test_long_chain_drops_without_overflow() {
        let mut root = TreeNode::leaf(199_999);
        for value in (0..199_999).rev() {
            root = TreeNode::leaf(value).with_right(root);
        }
        assert_eq!(root.levels(), 200_000);
        drop(root);
    }
}
