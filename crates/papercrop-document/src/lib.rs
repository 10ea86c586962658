// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// papercrop-document — Paper detection and deskewing for camera frames.
//
// Finds the sheet of paper in a frame (global threshold, outer contours,
// quadrilateral selection), orders its corners, warps it into an upright
// rectangle and optionally applies an adaptive-threshold document filter.

pub mod scan;
pub mod scanner;

// Re-export the primary entry points so callers can use
// `papercrop_document::detect` etc.
pub use scan::{OrderedQuad, OrientationFix, detect, enhance, order_corners, rectify};
pub use scanner::{DocumentScanner, ScanOutcome};
