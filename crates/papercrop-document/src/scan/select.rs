// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral selection — pick the contour most likely to be the sheet of
// paper under the camera.
//
// The paper is assumed to be roughly centred and to span a large part of the
// frame width. Small background rectangles and off-centre clutter fail these
// checks, so no learned model is needed.

use imageproc::geometry::arc_length;
use imageproc::point::Point as PixelPoint;
use papercrop_core::{CornerSet, FrameSize, Point, SelectorConfig};
use tracing::{debug, instrument, trace};

use super::contours::RankedContour;
use super::polygon::{BoundingRect, simplify_closed};

/// When a frame has at most this many contours, all of them are examined.
pub const FULL_SCAN_LIMIT: usize = 5;

/// Otherwise examination stops after this index of the ranked list.
pub const CAPPED_LAST_INDEX: usize = 4;

/// Number of leading contours of a ranked list that the selector looks at.
pub fn examined_count(total: usize) -> usize {
    if total <= FULL_SCAN_LIMIT {
        total
    } else {
        CAPPED_LAST_INDEX + 1
    }
}

/// Whether a candidate's bounding box satisfies the size and position prior.
pub fn accepts_bounds(rect: &BoundingRect, frame: FrameSize, config: &SelectorConfig) -> bool {
    let center = rect.center();
    let frame_center = frame.center();
    let dx = center.x - frame_center.x;
    let dy = center.y - frame_center.y;

    rect.width as f64 > frame.width as f64 * config.min_width_ratio
        && dx.abs() < config.max_center_dx
        && dy.abs() < config.max_center_dy
}

/// Choose the best four-cornered paper candidate among ranked contours.
///
/// Each examined contour must enclose more than `min_contour_area`, simplify
/// to exactly four vertices and pass [`accepts_bounds`]. Of the survivors the
/// one with the largest contour area wins; on equal areas the earlier one is
/// kept. Returns `None` when nothing qualifies.
#[instrument(skip(contours, config), fields(count = contours.len()))]
pub fn select_quadrilateral(
    contours: &[RankedContour],
    frame: FrameSize,
    config: &SelectorConfig,
) -> Option<CornerSet> {
    let mut best: Option<(f64, Vec<PixelPoint<i32>>)> = None;

    for (index, contour) in contours.iter().take(examined_count(contours.len())).enumerate() {
        if contour.area <= config.min_contour_area {
            continue;
        }

        let epsilon = config.approx_epsilon_ratio * arc_length(&contour.points, true);
        let approx = simplify_closed(&contour.points, epsilon);
        if approx.len() != 4 {
            trace!(index, vertices = approx.len(), "Not a quadrilateral");
            continue;
        }

        let Some(rect) = BoundingRect::of(&contour.points) else {
            continue;
        };
        if !accepts_bounds(&rect, frame, config) {
            trace!(index, ?rect, "Quadrilateral outside the paper prior");
            continue;
        }

        let best_area = best.as_ref().map_or(0.0, |(area, _)| *area);
        if contour.area > best_area {
            debug!(index, area = contour.area, ?rect, "New best paper candidate");
            best = Some((contour.area, approx));
        }
    }

    let (area, approx) = best?;
    let points = [0, 1, 2, 3].map(|i| Point::new(approx[i].x as f64, approx[i].y as f64));
    debug!(area, "Paper quadrilateral selected");
    Some(CornerSet::new(points, frame))
}
