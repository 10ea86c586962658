// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — paper mask, contour tracing, quadrilateral selection,
// corner ordering, perspective rectification and the document filter.

pub mod binarize;
pub mod contours;
pub mod detect;
pub mod enhance;
pub mod order;
pub mod polygon;
pub mod rectify;
pub mod select;

pub use detect::detect;
pub use enhance::enhance;
pub use order::{OrderedQuad, order_corners};
pub use rectify::{OrientationFix, rectify};
