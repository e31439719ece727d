//! Configuration for SVG rendering

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::NODE_RADIUS;

/// Errors that can occur when loading a render configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Default colors, exposed to the SVG as CSS custom properties
const DEFAULT_PALETTE: &[(&str, &str)] = &[
    ("edge", "#90a4ae"),
    ("node-fill", "#e3f2fd"),
    ("node-stroke", "#1565c0"),
    ("highlight-fill", "#fff3e0"),
    ("highlight-stroke", "#e65100"),
    ("text", "#1a1a1a"),
    ("muted", "#999999"),
];

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Margin added around the view frame
    pub viewbox_padding: f64,

    /// Minimum value of the `height` attribute
    pub min_height: f64,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "bst-" for "bst-node")
    pub class_prefix: Option<String>,

    /// Color tokens written as `--name: value` custom properties
    pub palette: BTreeMap<String, String>,

    /// Text shown when the tree has no nodes
    pub empty_message: String,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: NODE_RADIUS + 40.0,
            min_height: 400.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("bst-".to_string()),
            palette: DEFAULT_PALETTE
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            empty_message: "Tree is empty. Insert a value.".to_string(),
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a configuration from a TOML string
    ///
    /// Palette entries are merged over the default palette.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut parsed: SvgConfig = toml::from_str(content)?;
        let mut palette = SvgConfig::default().palette;
        palette.append(&mut parsed.palette);
        parsed.palette = palette;
        Ok(parsed)
    }

    /// Set the viewBox padding
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set the minimum height attribute
    pub fn with_min_height(mut self, height: f64) -> Self {
        self.min_height = height;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set one palette color
    pub fn with_color(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.palette.insert(token.into(), value.into());
        self
    }
}
