// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-frame paper detection: mask, contours, quadrilateral selection.

use image::DynamicImage;
use papercrop_core::error::Result;
use papercrop_core::{CornerSet, FrameSize, ScanConfig};
use tracing::{debug, instrument};

use super::binarize::binarize;
use super::contours::extract_contours;
use super::select::select_quadrilateral;

/// Find the paper quadrilateral in a preview frame.
///
/// `Ok(None)` means no contour met the paper constraints; callers just try
/// again on the next frame. Only a zero-sized frame is an error.
#[instrument(skip(frame, config), fields(width = frame.width(), height = frame.height()))]
pub fn detect(frame: &DynamicImage, config: &ScanConfig) -> Result<Option<CornerSet>> {
    let mask = binarize(frame, config.binarize_threshold)?;
    let contours = extract_contours(&mask);
    let size = FrameSize::new(frame.width(), frame.height());

    let corners = select_quadrilateral(&contours, size, &config.selector);
    if corners.is_none() {
        debug!(contours = contours.len(), "No paper candidate in frame");
    }
    Ok(corners)
}
