// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Polygon helpers for traced contours — enclosed area, bounding box and
// Douglas–Peucker simplification of closed curves.

use imageproc::point::Point as PixelPoint;
use papercrop_core::Point;

/// Axis-aligned, pixel-inclusive bounding box of a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn of(points: &[PixelPoint<i32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// Area enclosed by a closed polygon (shoelace formula, orientation ignored).
pub fn polygon_area(points: &[PixelPoint<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0f64;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += points[i].x as f64 * points[j].y as f64;
        twice_area -= points[j].x as f64 * points[i].y as f64;
    }
    twice_area.abs() / 2.0
}

/// Simplify a closed curve with the Douglas–Peucker algorithm.
///
/// The curve is split at two mutually distant points, both halves are
/// simplified as open chains and joined again. The output never repeats its
/// first vertex at the end.
pub fn simplify_closed(points: &[PixelPoint<i32>], epsilon: f64) -> Vec<PixelPoint<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let first = farthest_from(points, points[0]);
    let second = farthest_from(points, points[first]);
    let (a, b) = (first.min(second), first.max(second));
    if a == b {
        // Every point coincides.
        return vec![points[a]];
    }

    let forward = &points[a..=b];
    let backward: Vec<PixelPoint<i32>> = points[b..]
        .iter()
        .chain(points[..=a].iter())
        .copied()
        .collect();

    let mut simplified = Vec::new();
    douglas_peucker(forward, epsilon, &mut simplified);
    douglas_peucker(&backward, epsilon, &mut simplified);
    simplified
}

/// Simplify an open chain of at least two points. Pushes every kept vertex
/// except the chain's last one, so consecutive chains join without duplicates.
fn douglas_peucker(chain: &[PixelPoint<i32>], epsilon: f64, out: &mut Vec<PixelPoint<i32>>) {
    let last = chain.len() - 1;
    let (start, end) = (chain[0], chain[last]);

    let mut max_distance = 0.0;
    let mut split = 0;
    for (i, p) in chain.iter().enumerate().take(last).skip(1) {
        let d = line_distance(*p, start, end);
        if d > max_distance {
            max_distance = d;
            split = i;
        }
    }

    if max_distance > epsilon {
        douglas_peucker(&chain[..=split], epsilon, out);
        douglas_peucker(&chain[split..], epsilon, out);
    } else {
        out.push(start);
    }
}

/// Index of the first point at maximal distance from `origin`.
fn farthest_from(points: &[PixelPoint<i32>], origin: PixelPoint<i32>) -> usize {
    let mut best = 0;
    let mut best_distance = -1.0;
    for (i, p) in points.iter().enumerate() {
        let d = pixel_distance(*p, origin);
        if d > best_distance {
            best_distance = d;
            best = i;
        }
    }
    best
}

fn pixel_distance(a: PixelPoint<i32>, b: PixelPoint<i32>) -> f64 {
    ((a.x - b.x) as f64).hypot((a.y - b.y) as f64)
}

/// Perpendicular distance from `p` to the line through `a` and `b`.
fn line_distance(p: PixelPoint<i32>, a: PixelPoint<i32>, b: PixelPoint<i32>) -> f64 {
    let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return pixel_distance(p, a);
    }
    (dy * (p.x - a.x) as f64 - dx * (p.y - a.y) as f64).abs() / length
}
