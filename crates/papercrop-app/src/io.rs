// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image file loading and saving for the command line front end.

use std::path::Path;

use image::DynamicImage;
use papercrop_core::error::{PapercropError, Result};
use tracing::{debug, info, instrument};

/// Decode an image file (JPEG, PNG, TIFF, ...).
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let image = image::open(path.as_ref()).map_err(|err| {
        PapercropError::ImageError(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(
        width = image.width(),
        height = image.height(),
        "Image loaded"
    );
    Ok(image)
}

/// Write an image; the format follows the file extension.
///
/// JPEG has no alpha channel, so RGBA crops are flattened to RGB for it.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_image(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg"));

    let result = if is_jpeg {
        DynamicImage::ImageRgb8(image.to_rgb8()).save(path)
    } else {
        image.save(path)
    };
    result.map_err(|err| {
        PapercropError::ImageError(format!("failed to save image to {}: {}", path.display(), err))
    })?;

    debug!(width = image.width(), height = image.height(), "Image saved");
    Ok(())
}
