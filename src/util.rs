//! Geometry helpers shared by the tracker and the replay tooling.
//!
//! This module provides:
//! - [`Point`] for client and surface-local coordinates
//! - [`Bounds`] describing a surface rectangle in client space
//! - Distance calculations used for tap classification

use serde::{Deserialize, Serialize};

// ============================================================================
// Points
// ============================================================================

/// A 2D coordinate pair in pixels (or in UV space for normalized positions).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Returns the Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

// ============================================================================
// Bounds
// ============================================================================

/// Rectangle describing where a surface sits in client coordinates.
///
/// `right` and `bottom` are exclusive edges, so a point lying exactly on them
/// is outside the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Creates bounds from an origin and a size. Negative sizes are clamped to zero.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Builds bounds from min/max edges (inclusive min, exclusive max).
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Bounds of a viewport of the given size anchored at the client origin.
    pub fn viewport(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Half-open containment test on client coordinates.
    pub fn contains(&self, client: Point) -> bool {
        client.x >= self.left
            && client.x < self.right
            && client.y >= self.top
            && client.y < self.bottom
    }

    /// Converts a client coordinate into a position relative to the top-left corner.
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Normalizes a local position by the rectangle size.
    ///
    /// An axis with zero extent maps to `0.0` instead of producing NaN/infinity.
    pub fn to_uv(&self, local: Point) -> Point {
        let u = if self.width > 0.0 {
            local.x / self.width
        } else {
            0.0
        };
        let v = if self.height > 0.0 {
            local.y / self.height
        } else {
            0.0
        };
        Point::new(u, v)
    }

    /// Returns true if the rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
