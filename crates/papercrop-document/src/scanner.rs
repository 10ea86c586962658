// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DocumentScanner — the pipeline behind one validated configuration.
//
// The scanner holds no per-frame state, so one instance can be shared by
// several worker threads as long as each call gets its own frame.

use image::DynamicImage;
use papercrop_core::error::Result;
use papercrop_core::{CornerSet, ScanConfig};
use tracing::{info, instrument};

use crate::scan::{self, OrderedQuad, order_corners};

/// Result of a one-shot [`DocumentScanner::scan`].
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Corners as detected, in no particular order.
    pub corners: CornerSet,
    /// The same corners in canonical order, as used for the crop.
    pub quad: OrderedQuad,
    /// Rectified crop, filtered when `enhance_output` is set.
    pub image: DynamicImage,
}

/// Detects, rectifies and enhances paper documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentScanner {
    config: ScanConfig,
}

impl DocumentScanner {
    /// Create a scanner, rejecting unusable configuration values.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Paper corners in a preview frame, if any.
    pub fn detect(&self, frame: &DynamicImage) -> Result<Option<CornerSet>> {
        scan::detect(frame, &self.config)
    }

    /// Upright crop of the accepted quadrilateral.
    pub fn rectify(&self, frame: &DynamicImage, quad: &OrderedQuad) -> Result<DynamicImage> {
        scan::rectify(frame, quad, &self.config.rectify)
    }

    /// Document filter view of an image.
    pub fn enhance(&self, image: &DynamicImage) -> Result<DynamicImage> {
        scan::enhance(image, &self.config.enhance)
    }

    /// Detect, order and rectify in one call, filtering the crop when
    /// `enhance_output` is configured. `Ok(None)` when no paper is found.
    #[instrument(skip(self, frame), fields(width = frame.width(), height = frame.height()))]
    pub fn scan(&self, frame: &DynamicImage) -> Result<Option<ScanOutcome>> {
        let Some(corners) = self.detect(frame)? else {
            return Ok(None);
        };
        let quad = order_corners(&corners.points);
        let mut image = self.rectify(frame, &quad)?;
        if self.config.enhance_output {
            image = self.enhance(&image)?;
        }

        info!(
            out_w = image.width(),
            out_h = image.height(),
            enhanced = self.config.enhance_output,
            "Document scanned"
        );
        Ok(Some(ScanOutcome {
            corners,
            quad,
            image,
        }))
    }
}
