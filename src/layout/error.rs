//! Error types for the layout engine

use std::fmt;

use thiserror::Error;

use super::types::{HorizontalBounds, PositionedNode};

/// The pass during which an integrity check ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStage {
    /// Bounds scan right after positions were assigned
    Layout,
    /// Raw bounds handed to the normalizer
    Centering,
    /// Re-scan after the centering shift
    Normalized,
}

impl fmt::Display for LayoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutStage::Layout => "layout",
            LayoutStage::Centering => "centering",
            LayoutStage::Normalized => "normalization",
        };
        f.write_str(name)
    }
}

/// Layout integrity failures
///
/// None of these can occur for a well-formed tree; they guard against
/// hand-built or corrupted positioned trees reaching the frame computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A node carries an unset (NaN) or infinite coordinate
    #[error("node {value} has non-finite coordinate ({x}, {y}) after {stage}")]
    NonFiniteCoordinate {
        stage: LayoutStage,
        value: i64,
        x: f64,
        y: f64,
    },

    /// Horizontal bounds are NaN or infinite
    #[error("non-finite bounds after {stage}: min_x={min_x}, max_x={max_x}")]
    NonFiniteBounds {
        stage: LayoutStage,
        min_x: f64,
        max_x: f64,
    },

    /// Minimum bound lies to the right of the maximum
    #[error("inverted bounds after {stage}: min_x={min_x} > max_x={max_x}")]
    InvertedBounds {
        stage: LayoutStage,
        min_x: f64,
        max_x: f64,
    },
}

impl LayoutError {
    pub(crate) fn non_finite_coordinate(stage: LayoutStage, node: &PositionedNode) -> Self {
        Self::NonFiniteCoordinate {
            stage,
            value: node.value,
            x: node.x,
            y: node.y,
        }
    }

    pub(crate) fn non_finite_bounds(stage: LayoutStage, bounds: HorizontalBounds) -> Self {
        Self::NonFiniteBounds {
            stage,
            min_x: bounds.min_x,
            max_x: bounds.max_x,
        }
    }

    pub(crate) fn inverted_bounds(stage: LayoutStage, bounds: HorizontalBounds) -> Self {
        Self::InvertedBounds {
            stage,
            min_x: bounds.min_x,
            max_x: bounds.max_x,
        }
    }

    /// The pass that detected the failure
    pub fn stage(&self) -> LayoutStage {
        match self {
            Self::NonFiniteCoordinate { stage, .. }
            | Self::NonFiniteBounds { stage, .. }
            | Self::InvertedBounds { stage, .. } => *stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_bounds_display() {
        let err = LayoutError::non_finite_bounds(
            LayoutStage::Centering,
            HorizontalBounds {
                min_x: f64::INFINITY,
                max_x: f64::NEG_INFINITY,
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("centering"));
        assert!(msg.contains("min_x=inf"));
        assert_eq!(err.stage(), LayoutStage::Centering);
    }

    #[test]
    fn test_coordinate_display_names_node() {
        let err = LayoutError::NonFiniteCoordinate {
            stage: LayoutStage::Normalized,
            value: 42,
            x: f64::NAN,
            y: 0.0,
        };
        assert!(err.to_string().contains("node 42"));
        assert!(err.to_string().contains("NaN"));
    }
}
