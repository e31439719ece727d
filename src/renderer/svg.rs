//! SVG generation from tree layouts

use crate::layout::{PositionedNode, TreeLayout, ViewFrame, NODE_RADIUS};

use super::SvgConfig;

/// Size of the placeholder canvas shown instead of a tree
const PLACEHOLDER_VIEWBOX: ViewBox = ViewBox {
    x: 0.0,
    y: 0.0,
    width: 400.0,
    height: 120.0,
};

/// The `viewBox` rectangle of the root element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Pad a layout frame into the visible window.
    ///
    /// Sized from `frame.width`, which already honours `MIN_FRAME_WIDTH`, and
    /// centered on the frame. This departs from sizing by the raw
    /// `max_x - min_x` extent: a narrow tree keeps the floored window instead
    /// of being stretched to fill it.
    pub fn around(frame: &ViewFrame, padding: f64) -> Self {
        Self {
            x: frame.center_x() - frame.width / 2.0 - padding,
            y: -padding,
            width: frame.width + 2.0 * padding,
            height: frame.height + 2.0 * padding,
        }
    }
}

/// A straight edge between two node circles
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    edges: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            edges: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties and class rules for the configured palette
    pub fn add_palette(&mut self) {
        if self.config.palette.is_empty() {
            return;
        }
        let p = self.prefix();
        let mut root = String::from(":root {");
        for (token, value) in &self.config.palette {
            root.push_str(&format!(" --{}: {};", token, value));
        }
        root.push_str(" }");
        self.styles.push(root);
        self.styles.push(format!(
            ".{p}edge {{ stroke: var(--edge); stroke-width: 2; }}"
        ));
        self.styles.push(format!(
            ".{p}node-circle {{ fill: var(--node-fill); stroke: var(--node-stroke); stroke-width: 2; }}"
        ));
        self.styles.push(format!(
            ".{p}node-circle.{p}highlight {{ fill: var(--highlight-fill); stroke: var(--highlight-stroke); }}"
        ));
        self.styles.push(format!(
            ".{p}node-text {{ fill: var(--text); font-size: 14px; text-anchor: middle; dominant-baseline: central; }}"
        ));
        self.styles
            .push(format!(".{p}empty-state {{ fill: var(--muted); }}"));
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add an edge line; edges are emitted beneath all nodes
    pub fn add_edge(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let prefix = self.prefix();
        self.edges.push(format!(
            r#"{}<line class="{}edge" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            self.indent_str(),
            prefix,
            x1,
            y1,
            x2,
            y2
        ));
    }

    /// Add a labelled node circle
    pub fn add_node(&mut self, value: i64, cx: f64, cy: f64, r: f64, highlight: bool) {
        let prefix = self.prefix();
        let highlight_class = if highlight {
            format!(" {}highlight", prefix)
        } else {
            String::new()
        };

        self.elements.push(format!(
            r#"{}<g class="{}node" data-value="{}">"#,
            self.indent_str(),
            prefix,
            value
        ));
        self.indent += 1;
        self.elements.push(format!(
            r#"{}<circle class="{}node-circle{}" cx="{}" cy="{}" r="{}"/>"#,
            self.indent_str(),
            prefix,
            highlight_class,
            cx,
            cy,
            r
        ));
        self.elements.push(format!(
            r#"{}<text class="{}node-text" x="{}" y="{}">{}</text>"#,
            self.indent_str(),
            prefix,
            cx,
            cy,
            value
        ));
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Add centered placeholder text
    pub fn add_message(&mut self, text: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<text class="{}empty-state" x="50%" y="50%" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            prefix,
            escape_xml(text)
        ));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: ViewBox) -> String {
        let height = viewbox.height.max(self.config.min_height);
        let nl = self.newline();
        let inner = if self.config.pretty_print { "  " } else { "" };

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="100%" height="{}">"#,
            viewbox.x, viewbox.y, viewbox.width, viewbox.height, height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str(inner);
            svg.push_str("<style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str(inner);
                svg.push_str(inner);
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str(inner);
            svg.push_str("</style>");
            svg.push_str(nl);
        }

        for edge in &self.edges {
            svg.push_str(edge);
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a tree layout to an SVG string.
///
/// `None` renders the empty-tree placeholder. A node whose value equals
/// `highlight` gets the highlight class.
pub fn render_svg(layout: Option<&TreeLayout>, config: &SvgConfig, highlight: Option<i64>) -> String {
    let Some(layout) = layout else {
        return render_placeholder(&config.empty_message, config);
    };

    let mut builder = SvgBuilder::new(config.clone());
    builder.add_palette();

    for node in layout.root.iter() {
        for child in node.children() {
            if let Some(edge) = edge_between(node, child, NODE_RADIUS) {
                builder.add_edge(edge.x1, edge.y1, edge.x2, edge.y2);
            }
        }
    }

    for node in layout.root.iter() {
        builder.add_node(
            node.value,
            node.x,
            node.y,
            NODE_RADIUS,
            highlight == Some(node.value),
        );
    }

    builder.build(ViewBox::around(&layout.frame, config.viewbox_padding))
}

/// Render a message on the placeholder canvas instead of a tree
pub fn render_placeholder(message: &str, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_palette();
    builder.add_message(message);
    builder.build(PLACEHOLDER_VIEWBOX)
}

/// Line between two node centers, trimmed by `radius` at both ends.
///
/// Coincident nodes produce no edge.
fn edge_between(parent: &PositionedNode, child: &PositionedNode, radius: f64) -> Option<Segment> {
    let dx = child.x - parent.x;
    let dy = child.y - parent.y;
    let dist = dx.hypot(dy);
    if dist == 0.0 {
        return None;
    }
    let (ux, uy) = (dx / dist, dy / dist);
    Some(Segment {
        x1: parent.x + ux * radius,
        y1: parent.y + uy * radius,
        x2: child.x - ux * radius,
        y2: child.y - uy * radius,
    })
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
