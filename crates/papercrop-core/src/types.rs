// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core geometry types exchanged between the detection pipeline and its callers.

use serde::{Deserialize, Serialize};

/// A point in image coordinates (pixels, origin top-left, y pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Width and height of the frame a detection was made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Centre of the frame in pixel coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Four detected paper corners plus the size of the frame they came from.
///
/// The corners carry no particular order; the corner orderer in
/// `papercrop-document` turns them into a canonical quadrilateral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerSet {
    pub points: [Point; 4],
    pub frame: FrameSize,
}

impl CornerSet {
    pub fn new(points: [Point; 4], frame: FrameSize) -> Self {
        Self { points, frame }
    }

    /// Smallest pixel-inclusive axis-aligned box around the corners, as
    /// `(min_x, min_y, width, height)`.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let min_x = self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = self.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        (min_x, min_y, max_x - min_x + 1.0, max_y - min_y + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn frame_center() {
        let frame = FrameSize::new(800, 1000);
        assert_eq!(frame.center(), Point::new(400.0, 500.0));
    }

    #[test]
    fn corner_set_bounding_box_is_pixel_inclusive() {
        let corners = CornerSet::new(
            [
                Point::new(200.0, 200.0),
                Point::new(599.0, 200.0),
                Point::new(599.0, 799.0),
                Point::new(200.0, 799.0),
            ],
            FrameSize::new(800, 1000),
        );
        assert_eq!(corners.bounding_box(), (200.0, 200.0, 400.0, 600.0));
    }

    #[test]
    fn corner_set_serializes_as_json() {
        let corners = CornerSet::new([Point::new(1.0, 2.0); 4], FrameSize::new(10, 20));
        let json = serde_json::to_string(&corners).expect("serialize");
        let back: CornerSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, corners);
    }
}
