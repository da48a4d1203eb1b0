//! Axis-aligned bounding boxes in screen pixels
//!
//! Coordinates are integer pixels with y growing downward, matching the
//! renderer's screen space. A box is stored as its top-left corner plus
//! extents; edges are derived on demand.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected box construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("degenerate box {width}x{height} at ({x}, {y}): extents must be positive")]
    Degenerate {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

/// An axis-aligned bounding box (top-left + extents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Aabb {
    /// Build a box without validation. Use for boxes whose extents come
    /// from already-validated data (masks, settings).
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box, rejecting zero-area and inverted extents
    pub fn checked(x: i32, y: i32, width: i32, height: i32) -> Result<Self, GeometryError> {
        if width <= 0 || height <= 0 {
            return Err(GeometryError::Degenerate {
                x,
                y,
                width,
                height,
            });
        }
        Ok(Self::new(x, y, width, height))
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    #[inline]
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    #[inline]
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    #[inline]
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Center of the bottom edge
    pub fn mid_bottom(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.bottom())
    }

    /// Move the box so the center of its bottom edge sits at `point`
    pub fn set_mid_bottom(&mut self, point: IVec2) {
        self.x = point.x - self.width / 2;
        self.set_bottom(point.y);
    }

    pub fn translate_x(&mut self, dx: i32) {
        self.x += dx;
    }

    pub fn translate_y(&mut self, dy: i32) {
        self.y += dy;
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlapping region of two boxes, if any
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        if !self.overlaps(other) {
            return None;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Aabb::new(left, top, right - left, bottom - top))
    }

    /// Whether a point lies inside the box (left/top inclusive, right/bottom exclusive)
    pub fn contains_point(&self, point: IVec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}
