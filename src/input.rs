//! Reading tree shapes from the tree service's JSON
//!
//! Accepted documents:
//! - `null` for an empty tree
//! - a node object `{"value": 10, "left": {...} | null, "right": ... }`;
//!   extra fields such as `height` are ignored
//! - the service envelope `{"tree": <node or null>, "size": 3}`

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::InputError;
use crate::tree::TreeNode;

/// Parse a tree shape from a JSON string
pub fn parse_tree(source: &str) -> Result<Option<TreeNode>, InputError> {
    let document: Value = serde_json::from_str(source)?;
    let tree = match document {
        Value::Object(ref map) if map.contains_key("tree") && !map.contains_key("value") => {
            if let Some(size) = map.get("size").and_then(Value::as_u64) {
                debug!(size, "reading tree envelope");
            }
            shape_from_value(map.get("tree").cloned().unwrap_or(Value::Null))?
        }
        other => shape_from_value(other)?,
    };
    Ok(tree)
}

/// Read and parse a tree shape from any reader
pub fn read_tree<R: Read>(mut reader: R) -> Result<Option<TreeNode>, InputError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    parse_tree(&source)
}

/// Read and parse a tree shape from a file
pub fn load_tree(path: &Path) -> Result<Option<TreeNode>, InputError> {
    let source = std::fs::read_to_string(path)?;
    parse_tree(&source)
}

fn shape_from_value(value: Value) -> Result<Option<TreeNode>, InputError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
        other => Err(InputError::Shape(format!(
            "expected a node object or null, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_empty() {
        assert!(parse_tree("null").unwrap().is_none());
    }

    #[test]
    fn test_service_node_format() {
        let source = r#"{"value":10,"left":{"value":5,"left":null,"right":null,"height":1},"right":null,"height":2}"#;
        let root = parse_tree(source).unwrap().unwrap();
        assert_eq!(root, TreeNode::leaf(10).with_left(TreeNode::leaf(5)));
    }

    #[test]
    fn test_missing_children_default_to_none() {
        let root = parse_tree(r#"{"value": -3}"#).unwrap().unwrap();
        assert_eq!(root, TreeNode::leaf(-3));
    }

    #[test]
    fn test_envelope() {
        let root = parse_tree(r#"{"tree":{"value":1,"right":{"value":2}},"size":2}"#)
            .unwrap()
            .unwrap();
        assert_eq!(root.node_count(), 2);
        assert!(parse_tree(r#"{"tree":null,"size":0}"#).unwrap().is_none());
    }

    #[test]
    fn test_rejects_non_object() {
        let err = parse_tree("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_rejects_missing_value() {
        assert!(matches!(
            parse_tree(r#"{"left": null}"#),
            Err(InputError::Json { .. })
        ));
    }

    #[test]
    fn test_read_tree_from_reader() {
        let root = read_tree(r#"{"value": 4}"#.as_bytes()).unwrap().unwrap();
        assert_eq!(root.value, 4);
    }
}
