// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering — canonical (top-left, top-right, bottom-right,
// bottom-left) order for four unordered points.

use papercrop_core::{CornerSet, Point};

/// Four corners in canonical clockwise order starting at the top-left.
///
/// Only [`order_corners`] builds one, so a rectifier receiving an
/// `OrderedQuad` can rely on the corner roles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedQuad {
    top_left: Point,
    top_right: Point,
    bottom_right: Point,
    bottom_left: Point,
}

impl OrderedQuad {
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn top_right(&self) -> Point {
        self.top_right
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    /// Corners as `[TL, TR, BR, BL]`.
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

impl From<&CornerSet> for OrderedQuad {
    fn from(corners: &CornerSet) -> Self {
        order_corners(&corners.points)
    }
}

/// Assign corner roles by diagonal extremes.
///
/// TL minimises `x + y`, BR maximises it; TR minimises `y - x`, BL maximises
/// it. The first point wins ties. Degenerate input may give two roles the
/// same point.
pub fn order_corners(points: &[Point; 4]) -> OrderedQuad {
    let sum = |p: &Point| p.x + p.y;
    let diff = |p: &Point| p.y - p.x;

    OrderedQuad {
        top_left: extreme(points, sum, false),
        top_right: extreme(points, diff, false),
        bottom_right: extreme(points, sum, true),
        bottom_left: extreme(points, diff, true),
    }
}

fn extreme(points: &[Point; 4], key: impl Fn(&Point) -> f64, maximise: bool) -> Point {
    let mut best = points[0];
    let mut best_key = key(&best);
    for p in &points[1..] {
        let k = key(p);
        let better = if maximise { k > best_key } else { k < best_key };
        if better {
            best = *p;
            best_key = k;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: [(f64, f64); 4]) -> [Point; 4] {
        raw.map(Point::from)
    }

    #[test]
    fn canonical_square_is_unchanged() {
        let square = pts([(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert_eq!(order_corners(&square).to_array(), square);
    }

    #[test]
    fn shuffled_skewed_quad_is_ordered() {
        let quad = pts([(610.0, 790.0), (190.0, 230.0), (180.0, 820.0), (600.0, 210.0)]);
        let ordered = order_corners(&quad);
        assert_eq!(ordered.top_left(), Point::new(190.0, 230.0));
        assert_eq!(ordered.top_right(), Point::new(600.0, 210.0));
        assert_eq!(ordered.bottom_right(), Point::new(610.0, 790.0));
        assert_eq!(ordered.bottom_left(), Point::new(180.0, 820.0));
    }

    #[test]
    fn ordering_is_idempotent() {
        let quad = pts([(35.0, 400.0), (420.0, 15.0), (700.0, 650.0), (60.0, 20.0)]);
        let once = order_corners(&quad);
        let twice = order_corners(&once.to_array());
        assert_eq!(once, twice);
    }

    #[test]
    fn duplicate_points_may_share_roles() {
        let quad = pts([(5.0, 5.0), (5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        let ordered = order_corners(&quad);
        assert!(ordered.to_array().iter().all(|p| *p == Point::new(5.0, 5.0)));
    }

    #[test]
    fn corner_set_converts_into_quad() {
        let corners = CornerSet::new(
            pts([(10.0, 10.0), (0.0, 10.0), (10.0, 0.0), (0.0, 0.0)]),
            papercrop_core::FrameSize::new(20, 20),
        );
        let quad = OrderedQuad::from(&corners);
        assert_eq!(quad.top_left(), Point::new(0.0, 0.0));
        assert_eq!(quad.top_right(), Point::new(10.0, 0.0));
        assert_eq!(quad.bottom_right(), Point::new(10.0, 10.0));
        assert_eq!(quad.bottom_left(), Point::new(0.0, 10.0));
    }
}
