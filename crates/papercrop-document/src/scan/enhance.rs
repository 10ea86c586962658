// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document filter — grayscale plus adaptive mean thresholding, giving a
// crisp black-on-white look to a rectified crop.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::definitions::Image;
use imageproc::integral_image::{integral_image, sum_image_pixels};
use papercrop_core::EnhanceConfig;
use papercrop_core::error::{PapercropError, Result};
use tracing::{debug, info, instrument};

/// Binarize `image` against its local neighbourhood mean.
///
/// The output keeps the input's width and height and is stored as RGB so it
/// can be displayed like the colour crop it replaces.
#[instrument(skip(image, config), fields(width = image.width(), height = image.height()))]
pub fn enhance(image: &DynamicImage, config: &EnhanceConfig) -> Result<DynamicImage> {
    PapercropError::check_dimensions(image.width(), image.height())?;
    if config.block_size < 3 || config.block_size % 2 == 0 {
        return Err(PapercropError::InvalidConfig(format!(
            "block size must be odd and at least 3, got {}",
            config.block_size
        )));
    }

    info!(
        block_size = config.block_size,
        offset = config.offset,
        "Applying document filter"
    );
    let gray = image.to_luma8();
    let binary = adaptive_mean_threshold(&gray, config.block_radius(), config.offset);

    Ok(DynamicImage::ImageRgb8(
        DynamicImage::ImageLuma8(binary).to_rgb8(),
    ))
}

/// Per-pixel threshold against the mean of the surrounding square block.
///
/// The block mean is taken over a border that repeats the edge pixels and is
/// rounded to a whole grey level. A pixel becomes white when it is brighter
/// than `mean - ceil(offset)`, otherwise black.
pub fn adaptive_mean_threshold(gray: &GrayImage, block_radius: u32, offset: f64) -> GrayImage {
    let (width, height) = gray.dimensions();
    let side = 2 * block_radius + 1;
    let area = (side as u64 * side as u64) as f64;
    let offset = offset.ceil();

    let padded = replicate_border(gray, block_radius);
    let integral: Image<Luma<u64>> = integral_image::<_, u64>(&padded);
    let mut output = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            // Padded block for (x, y) spans [x, x + side - 1] in each axis.
            let [sum] = sum_image_pixels(&integral, x, y, x + side - 1, y + side - 1);
            let local_mean = (sum as f64 / area).round_ties_even();
            let value = gray.get_pixel(x, y).0[0] as f64;
            let binary = if value > local_mean - offset { 255u8 } else { 0u8 };
            output.put_pixel(x, y, Luma([binary]));
        }
    }

    debug!("Adaptive threshold complete");
    output
}

/// Copy of `gray` grown by `radius` on every side, repeating the edge pixels.
fn replicate_border(gray: &GrayImage, radius: u32) -> GrayImage {
    let (width, height) = gray.dimensions();
    GrayImage::from_fn(width + 2 * radius, height + 2 * radius, |x, y| {
        let sx = x.saturating_sub(radius).min(width - 1);
        let sy = y.saturating_sub(radius).min(height - 1);
        *gray.get_pixel(sx, sy)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[test]
    fn border_repeats_edge_pixels() {
        let gray = GrayImage::from_fn(3, 2, |x, y| Luma([(x + 3 * y) as u8]));
        let padded = replicate_border(&gray, 2);
        assert_eq!(padded.dimensions(), (7, 6));
        assert_eq!(padded.get_pixel(0, 0).0[0], 0);
        assert_eq!(padded.get_pixel(6, 0).0[0], 2);
        assert_eq!(padded.get_pixel(0, 5).0[0], 3);
        assert_eq!(padded.get_pixel(6, 5).0[0], 5);
        assert_eq!(padded.get_pixel(3, 3).0[0], 4);
    }

    #[test]
    fn edge_block_mean_uses_repeated_pixels() {
        // Left column darker than the page. Its block holds the column eight
        // times (mean 184), so it stays white; a clipped block (mean 196.25)
        // would turn it black.
        let gray = GrayImage::from_fn(20, 20, |x, _| Luma([if x == 0 { 170 } else { 200 }]));
        let binary = adaptive_mean_threshold(&gray, 7, 15.0);
        assert_eq!(binary.get_pixel(0, 10).0[0], 255);
        assert_eq!(binary.get_pixel(0, 0).0[0], 255);
        assert_eq!(binary.get_pixel(10, 10).0[0], 255);
    }

    #[test]
    fn mean_is_whole_grey_level_and_offset_rounds_up() {
        // Block mean 1020 / 9 = 113.3 rounds to 113; offset 13.2 acts as 14,
        // so the centre (100 > 99) stays white.
        let mut gray = GrayImage::from_pixel(3, 3, Luma([115]));
        gray.put_pixel(1, 1, Luma([100]));
        assert_eq!(adaptive_mean_threshold(&gray, 1, 13.2).get_pixel(1, 1).0[0], 255);
        // Offset 12 leaves 100 > 101 false.
        assert_eq!(adaptive_mean_threshold(&gray, 1, 12.0).get_pixel(1, 1).0[0], 0);
    }

    #[test]
    fn uniform_page_stays_white() {
        let gray = GrayImage::from_pixel(32, 32, Luma([180]));
        let binary = adaptive_mean_threshold(&gray, 7, 15.0);
        assert!(binary.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn ink_stroke_turns_black() {
        let mut gray = GrayImage::from_pixel(40, 40, Luma([230]));
        for x in 10..30 {
            gray.put_pixel(x, 20, Luma([40]));
        }
        let binary = adaptive_mean_threshold(&gray, 7, 15.0);
        assert_eq!(binary.get_pixel(20, 20).0[0], 0);
        assert_eq!(binary.get_pixel(20, 5).0[0], 255);
        assert_eq!(binary.get_pixel(20, 21).0[0], 255);
    }

    #[test]
    fn enhance_keeps_dimensions_as_rgb() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(23, 17, Rgba([200, 190, 180, 255])));
        let out = enhance(&img, &EnhanceConfig::default()).unwrap();
        assert_eq!(out.dimensions(), (23, 17));
        assert!(matches!(out, DynamicImage::ImageRgb8(_)));
        let rgb = out.to_rgb8();
        assert!(rgb.pixels().all(|p| p.0 == [0, 0, 0] || p.0 == [255, 255, 255]));
    }

    #[test]
    fn zero_sized_image_is_malformed() {
        let err = enhance(&DynamicImage::new_rgba8(0, 5), &EnhanceConfig::default()).unwrap_err();
        assert!(matches!(err, PapercropError::MalformedInput { .. }));
    }

    #[test]
    fn even_block_size_is_rejected() {
        let config = EnhanceConfig {
            block_size: 8,
            offset: 15.0,
        };
        let err = enhance(&DynamicImage::new_rgb8(4, 4), &config).unwrap_err();
        assert!(matches!(err, PapercropError::InvalidConfig(_)));
    }
}
