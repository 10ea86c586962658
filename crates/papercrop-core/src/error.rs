// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for papercrop.
//
// A frame without a usable paper candidate is not an error: detection returns
// `Ok(None)` and the caller simply tries the next frame.

use thiserror::Error;

/// Top-level error type for all papercrop operations.
#[derive(Debug, Error)]
pub enum PapercropError {
    // -- Input errors --
    #[error("malformed input image: {width}x{height}")]
    MalformedInput { width: u32, height: u32 },

    #[error("invalid quadrilateral geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Image codec errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PapercropError {
    /// Reject zero-sized images at the entry of a pipeline stage.
    pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Self::MalformedInput { width, height });
        }
        Ok(())
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PapercropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_malformed() {
        let err = PapercropError::check_dimensions(0, 10).unwrap_err();
        assert!(matches!(
            err,
            PapercropError::MalformedInput {
                width: 0,
                height: 10
            }
        ));
        assert_eq!(err.to_string(), "malformed input image: 0x10");
    }

    #[test]
    fn non_zero_dimensions_pass() {
        assert!(PapercropError::check_dimensions(1, 1).is_ok());
    }
}
