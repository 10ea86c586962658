// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outer contour extraction from a binary paper mask.

use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point as PixelPoint;
use tracing::{debug, instrument};

use super::polygon::polygon_area;

/// A traced outer boundary together with the area it encloses.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedContour {
    /// Every boundary pixel in tracing order (no simplification).
    pub points: Vec<PixelPoint<i32>>,
    pub area: f64,
}

impl RankedContour {
    pub fn new(points: Vec<PixelPoint<i32>>) -> Self {
        let area = polygon_area(&points);
        Self { points, area }
    }
}

/// Trace the outermost boundaries of all foreground regions in `mask`.
///
/// Contours nested inside holes of other regions are dropped. The result is
/// sorted by enclosed area, largest first. An empty mask yields no contours.
#[instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn extract_contours(mask: &GrayImage) -> Vec<RankedContour> {
    let traced = find_contours::<i32>(mask);
    let total = traced.len();

    let mut ranked: Vec<RankedContour> = traced
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| RankedContour::new(c.points))
        .collect();
    ranked.sort_by(|a, b| b.area.total_cmp(&a.area));

    debug!(total, outer = ranked.len(), "Contours traced");
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill(mask: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32, value: u8) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.put_pixel(x, y, Luma([value]));
            }
        }
    }

    #[test]
    fn empty_mask_has_no_contours() {
        let mask = GrayImage::new(64, 48);
        assert!(extract_contours(&mask).is_empty());
    }

    #[test]
    fn contours_are_ranked_by_area() {
        let mut mask = GrayImage::new(200, 200);
        fill(&mut mask, 10, 10, 20, 20, 255);
        fill(&mut mask, 60, 60, 100, 80, 255);
        fill(&mut mask, 170, 10, 10, 10, 255);

        let contours = extract_contours(&mask);
        assert_eq!(contours.len(), 3);
        assert!((contours[0].area - 99.0 * 79.0).abs() < 1e-9);
        assert!((contours[1].area - 19.0 * 19.0).abs() < 1e-9);
        assert!((contours[2].area - 9.0 * 9.0).abs() < 1e-9);
    }

    #[test]
    fn regions_inside_holes_are_not_returned() {
        let mut mask = GrayImage::new(120, 120);
        // A frame with a hole, and an island inside the hole.
        fill(&mut mask, 10, 10, 100, 100, 255);
        fill(&mut mask, 20, 20, 80, 80, 0);
        fill(&mut mask, 50, 50, 10, 10, 255);

        let contours = extract_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert!((contours[0].area - 99.0 * 99.0).abs() < 1e-9);
    }

    #[test]
    fn contour_keeps_every_boundary_pixel() {
        let mut mask = GrayImage::new(50, 50);
        fill(&mut mask, 10, 10, 20, 10, 255);

        let contours = extract_contours(&mask);
        assert_eq!(contours.len(), 1);
        let points = &contours[0].points;
        for corner in [(10, 10), (29, 10), (29, 19), (10, 19)] {
            assert!(points.contains(&PixelPoint::new(corner.0, corner.1)));
        }
        assert!(
            points
                .iter()
                .all(|p| p.x == 10 || p.x == 29 || p.y == 10 || p.y == 19)
        );
        assert!(points.len() >= 56);
    }
}
