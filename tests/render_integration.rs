//! Integration tests for the render pipeline: JSON in, SVG out.

use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use bst_layout::{
    render, render_json, render_placeholder, render_svg, render_with_config, RenderConfig,
    RenderError, SvgConfig, TreeNode,
};

fn compact_config() -> SvgConfig {
    let mut config = SvgConfig::new()
        .with_standalone(false)
        .with_pretty_print(false);
    config.palette.clear();
    config
}

/// Pull the four viewBox numbers out of an SVG string
fn viewbox(svg: &str) -> Vec<f64> {
    let start = svg.find("viewBox=\"").expect("svg has a viewBox") + 9;
    let end = start + svg[start..].find('"').expect("viewBox is closed");
    svg[start..end]
        .split_whitespace()
        .map(|s| s.parse().expect("viewBox number"))
        .collect()
}

#[test]
fn test_empty_tree_placeholder_markup() {
    let svg = render_svg(None, &compact_config(), None);
    assert_snapshot!(svg, @r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 400 120" width="100%" height="400"><text class="bst-empty-state" x="50%" y="50%" text-anchor="middle" dominant-baseline="middle">Tree is empty. Insert a value.</text></svg>"#);
}

#[test]
fn test_single_node_markup() {
    let config = RenderConfig::new().with_svg(compact_config());
    let svg = render_with_config(Some(&TreeNode::leaf(5)), &config).unwrap();
    assert_snapshot!(svg, @r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-268 -68 536 236" width="100%" height="400"><g class="bst-node" data-value="5"><circle class="bst-node-circle" cx="0" cy="0" r="28"/><text class="bst-node-text" x="0" y="0">5</text></g></svg>"#);
}

#[test]
fn test_service_payload_renders_every_node() {
    let payload = r#"{
        "tree": {
            "value": 8,
            "left": {"value": 4, "left": {"value": 2, "left": null, "right": null, "height": 1}, "right": null, "height": 2},
            "right": {"value": 12, "left": null, "right": {"value": 14, "left": null, "right": null, "height": 1}, "height": 2},
            "height": 3
        },
        "size": 5
    }"#;
    let svg = render_json(payload).unwrap();

    assert_eq!(svg.matches("<circle").count(), 5);
    assert_eq!(svg.matches("<line").count(), 4);
    for value in [8, 4, 2, 12, 14] {
        assert!(svg.contains(&format!(r#"data-value="{}""#, value)));
    }
}

#[test]
fn test_tall_tree_viewbox_grows_past_min_height() {
    let root = TreeNode::from_insertions(1..=6);
    let svg = render(root.as_ref()).unwrap();

    let vb = viewbox(&svg);
    // six levels plus padding on both sides
    assert_eq!(vb[1], -68.0);
    assert_eq!(vb[3], 600.0 + 136.0);
    assert!(svg.contains(r#"height="736""#));
}

#[test]
fn test_viewbox_encloses_every_circle() {
    let root = TreeNode::from_insertions([50, 20, 80, 10, 30, 25, 27, 90, 95, 99]);
    let svg = render(root.as_ref()).unwrap();
    let vb = viewbox(&svg);
    let (left, right) = (vb[0], vb[0] + vb[2]);

    for part in svg.split("<circle").skip(1) {
        let cx_start = part.find("cx=\"").unwrap() + 4;
        let cx_end = cx_start + part[cx_start..].find('"').unwrap();
        let cx: f64 = part[cx_start..cx_end].parse().unwrap();
        assert!(cx - 28.0 >= left && cx + 28.0 <= right, "circle at {} clipped", cx);
    }
}

#[test]
fn test_highlighted_node() {
    let config = RenderConfig::new().with_highlight(Some(-7));
    let root = TreeNode::from_insertions([0, -7, 7]);
    let svg = render_with_config(root.as_ref(), &config).unwrap();
    assert!(svg.contains(r#"<circle class="bst-node-circle bst-highlight""#));
    assert_eq!(svg.matches("bst-node-circle bst-highlight").count(), 1);
}

#[test]
fn test_config_from_toml_changes_output() {
    let config = SvgConfig::from_toml_str(
        r##"
class_prefix = "tree-"
standalone = false
empty_message = "Nothing here"

[palette]
edge = "#000000"
"##,
    )
    .unwrap();

    let svg = render_svg(None, &config, None);
    assert!(!svg.starts_with("<?xml"));
    assert!(svg.contains("tree-empty-state"));
    assert!(svg.contains("Nothing here"));
    assert!(svg.contains("--edge: #000000;"));
}

#[test]
fn test_placeholder_escapes_message() {
    let svg = render_placeholder("bad <input> & more", &compact_config());
    assert!(svg.contains("bad &lt;input&gt; &amp; more"));
}

#[test]
fn test_malformed_json_is_an_input_error() {
    let err = render_json(r#"{"value": "ten"}"#).unwrap_err();
    assert!(matches!(err, RenderError::Input(_)));
    assert!(err.to_string().starts_with("input error"));
}
