// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paper mask — grayscale conversion followed by a fixed global threshold.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::{self, ThresholdType};
use papercrop_core::error::{PapercropError, Result};
use tracing::{debug, instrument};

/// Convert a frame into a binary paper mask.
///
/// Pixels whose luma is at least `threshold` become 255, all others 0. The
/// mask has the frame's dimensions.
#[instrument(skip(frame), fields(width = frame.width(), height = frame.height()))]
pub fn binarize(frame: &DynamicImage, threshold: u8) -> Result<GrayImage> {
    PapercropError::check_dimensions(frame.width(), frame.height())?;

    let gray = frame.to_luma8();
    let mask = match threshold.checked_sub(1) {
        Some(cut) => contrast::threshold(&gray, cut, ThresholdType::Binary),
        // Every luma is at least zero.
        None => GrayImage::from_pixel(gray.width(), gray.height(), Luma([255])),
    };
    let foreground = mask.pixels().filter(|p| p.0[0] == 255).count();

    debug!(threshold, foreground, "Paper mask computed");
    Ok(mask)
}
