// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.
//
// Every tunable of the detection and rectification pipeline lives here with
// the defaults the capture pipeline was tuned for. The positional limits are
// in pixels of the analysed frame, so callers working at a very different
// resolution should scale them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PapercropError, Result};

/// Constraints used to pick the paper quadrilateral among frame contours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Contours with an enclosed area at or below this are ignored as noise.
    pub min_contour_area: f64,
    /// Polygon simplification tolerance as a fraction of the contour perimeter.
    pub approx_epsilon_ratio: f64,
    /// Bounding box width must exceed this fraction of the frame width.
    pub min_width_ratio: f64,
    /// Maximum horizontal distance (px) between box centre and frame centre.
    pub max_center_dx: f64,
    /// Maximum vertical distance (px) between box centre and frame centre.
    pub max_center_dy: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            min_contour_area: 100.0,
            approx_epsilon_ratio: 0.1,
            min_width_ratio: 0.3,
            max_center_dx: 100.0,
            max_center_dy: 300.0,
        }
    }
}

/// Settings for the perspective rectifier and its orientation fix-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyConfig {
    /// Apply the mirror/rotate orientation correction to small outputs.
    pub apply_orientation_fix: bool,
    /// Outputs taller than this are left as warped.
    pub orientation_height_limit: u32,
    /// Width/height ratio under which a mirrored output is also rotated.
    pub narrow_aspect_ratio: f64,
}

impl Default for RectifyConfig {
    fn default() -> Self {
        Self {
            apply_orientation_fix: true,
            orientation_height_limit: 1500,
            narrow_aspect_ratio: 0.5,
        }
    }
}

/// Adaptive mean threshold used by the document filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Side of the square neighbourhood (odd, >= 3).
    pub block_size: u32,
    /// Constant subtracted from the neighbourhood mean.
    pub offset: f64,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            block_size: 15,
            offset: 15.0,
        }
    }
}

impl EnhanceConfig {
    /// Neighbourhood radius around the centre pixel.
    pub fn block_radius(&self) -> u32 {
        self.block_size / 2
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Global gray threshold for the paper mask (pixels >= value are paper).
    pub binarize_threshold: u8,
    pub selector: SelectorConfig,
    pub rectify: RectifyConfig,
    pub enhance: EnhanceConfig,
    /// Run the document filter on the rectified crop in one-shot scans.
    pub enhance_output: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            binarize_threshold: 150,
            selector: SelectorConfig::default(),
            rectify: RectifyConfig::default(),
            enhance: EnhanceConfig::default(),
            enhance_output: false,
        }
    }
}

impl ScanConfig {
    /// Check that every value is usable by the pipeline.
    pub fn validate(&self) -> Result<()> {
        let sel = &self.selector;
        let positive = [
            ("selector.approx_epsilon_ratio", sel.approx_epsilon_ratio),
            ("selector.max_center_dx", sel.max_center_dx),
            ("selector.max_center_dy", sel.max_center_dy),
            ("rectify.narrow_aspect_ratio", self.rectify.narrow_aspect_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PapercropError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("selector.min_contour_area", sel.min_contour_area),
            ("selector.min_width_ratio", sel.min_width_ratio),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PapercropError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.enhance.block_size < 3 || self.enhance.block_size % 2 == 0 {
            return Err(PapercropError::InvalidConfig(format!(
                "enhance.block_size must be odd and at least 3, got {}",
                self.enhance.block_size
            )));
        }
        if !self.enhance.offset.is_finite() {
            return Err(PapercropError::InvalidConfig(
                "enhance.offset must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
