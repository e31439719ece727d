//! Fixed geometry constants for the layout engine
//!
//! These are the recognized knobs of the layout. They are compile-time
//! constants: every layout of the same shape produces the same geometry.

/// Radius of a node circle
pub const NODE_RADIUS: f64 = 28.0;

/// Vertical distance between consecutive depth levels
pub const LEVEL_SPACING: f64 = 100.0;

/// Minimum horizontal reservation of any node or subtree
pub const MIN_SIBLING_GAP: f64 = 80.0;

/// Floor for the width of the final view frame
pub const MIN_FRAME_WIDTH: f64 = 400.0;

// A lone node must fit inside the frame floor, and neighbouring reservations
// must keep circles apart.
const _: () = assert!(MIN_FRAME_WIDTH >= 2.0 * NODE_RADIUS);
const _: () = assert!(MIN_SIBLING_GAP > 2.0 * NODE_RADIUS);
