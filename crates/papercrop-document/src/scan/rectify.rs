// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — warp an ordered paper quadrilateral into an
// upright rectangle, then apply the capture orientation fix-up.

use image::imageops::{flip_horizontal, rotate270};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use papercrop_core::RectifyConfig;
use papercrop_core::error::{PapercropError, Result};
use tracing::{debug, info, instrument};

use super::order::OrderedQuad;

/// Largest crop, in pixels, that [`rectify`] will allocate.
pub const MAX_OUTPUT_PIXELS: u64 = 1 << 28;

/// Orientation correction applied to a freshly warped crop.
///
/// Small crops from the capture pipeline come out mirrored, and tall narrow
/// ones also lie on their side. Crops taller than the configured limit are
/// already upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationFix {
    /// Leave the crop as warped.
    Keep,
    /// Flip horizontally.
    Mirror,
    /// Flip horizontally, then rotate 90° counter-clockwise.
    MirrorThenRotate,
}

impl OrientationFix {
    /// Decide the correction for a warped crop of `width` x `height` pixels.
    pub fn for_size(width: u32, height: u32, config: &RectifyConfig) -> Self {
        if !config.apply_orientation_fix || height > config.orientation_height_limit {
            return Self::Keep;
        }
        if height > 0 && (width as f64 / height as f64) < config.narrow_aspect_ratio {
            Self::MirrorThenRotate
        } else {
            Self::Mirror
        }
    }

    pub fn apply(self, image: RgbaImage) -> RgbaImage {
        match self {
            Self::Keep => image,
            Self::Mirror => flip_horizontal(&image),
            Self::MirrorThenRotate => rotate270(&flip_horizontal(&image)),
        }
    }
}

/// Target `(width, height)` of the rectified crop: the longer of the two
/// opposite edges in each direction.
pub fn target_size(quad: &OrderedQuad) -> (f64, f64) {
    let (tl, tr, br, bl) = (
        quad.top_left(),
        quad.top_right(),
        quad.bottom_right(),
        quad.bottom_left(),
    );
    let width = br.distance(&bl).max(tr.distance(&tl));
    let height = tr.distance(&br).max(tl.distance(&bl));
    (width, height)
}

/// Pixel dimensions of a crop with target size `dw x dh`, checked against
/// the allocation limit before any buffer exists.
fn output_size(dw: f64, dh: f64) -> Result<(u32, u32)> {
    let (w, h) = (dw.round(), dh.round());
    if !(w.is_finite() && h.is_finite()) || w * h > MAX_OUTPUT_PIXELS as f64 {
        return Err(PapercropError::InvalidGeometry(format!(
            "crop of {dw:.2}x{dh:.2} exceeds {MAX_OUTPUT_PIXELS} pixels"
        )));
    }
    if w < 1.0 || h < 1.0 {
        return Err(PapercropError::InvalidGeometry(format!(
            "quadrilateral collapses to {dw:.2}x{dh:.2}"
        )));
    }
    Ok((w as u32, h as u32))
}

/// Warp the region of `frame` bounded by `quad` into an upright image.
///
/// The output is `round(width) x round(height)` of [`target_size`] before the
/// orientation fix, resampled bilinearly. Source pixels outside the frame
/// come out opaque black.
///
/// ## Errors
///
/// * `MalformedInput`: `frame` has a zero dimension.
/// * `InvalidGeometry`: a corner is not finite, the crop would have zero
///   width or height or exceed [`MAX_OUTPUT_PIXELS`], or the corners admit
///   no perspective transform.
#[instrument(skip(frame, quad, config), fields(width = frame.width(), height = frame.height()))]
pub fn rectify(
    frame: &DynamicImage,
    quad: &OrderedQuad,
    config: &RectifyConfig,
) -> Result<DynamicImage> {
    PapercropError::check_dimensions(frame.width(), frame.height())?;

    let corners = quad.to_array();
    for (role, point) in ["top-left", "top-right", "bottom-right", "bottom-left"]
        .iter()
        .zip(corners.iter())
    {
        debug!(role, %point, "Crop corner");
        if !point.is_finite() {
            return Err(PapercropError::InvalidGeometry(format!(
                "{role} corner is not finite: {point:?}"
            )));
        }
    }

    let (dw, dh) = target_size(quad);
    let (out_w, out_h) = output_size(dw, dh)?;

    let src = corners.map(|p| (p.x as f32, p.y as f32));
    let dest: [(f32, f32); 4] = [
        (0.0, 0.0),
        (dw as f32, 0.0),
        (dw as f32, dh as f32),
        (0.0, dh as f32),
    ];
    let projection = Projection::from_control_points(src, dest).ok_or_else(|| {
        PapercropError::InvalidGeometry("corners admit no perspective transform".into())
    })?;

    let rgba = frame.to_rgba8();
    let mut output = RgbaImage::new(out_w, out_h);
    warp_into(
        &rgba,
        &projection,
        Interpolation::Bilinear,
        Rgba([0, 0, 0, 255]),
        &mut output,
    );

    let fix = OrientationFix::for_size(out_w, out_h, config);
    let output = fix.apply(output);
    info!(
        out_w = output.width(),
        out_h = output.height(),
        ?fix,
        "Crop rectified"
    );

    Ok(DynamicImage::ImageRgba8(output))
}
