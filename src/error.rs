// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors reported by the lattice and the carver.

use crate::node::{Compass, NodeId};
use crate::seam::Orientation;
use thiserror::Error;

/// Everything that can go wrong while building, searching, or carving
/// a lattice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarveError {
    #[error("cannot build a {width}x{height} lattice from {pixels} pixels")]
    InvalidDimensions { width: u32, height: u32, pixels: usize },

    #[error("a {width}x{height} image has no more seams to carve")]
    GridTooSmall { width: u32, height: u32 },

    #[error("expected a {expected} seam, found a {found} seam")]
    SeamMismatch { expected: SeamShape, found: SeamShape },

    #[error("the seam no longer describes live pixels of this lattice")]
    StaleSeam,

    #[error("node {node:?} breaks the sentinel ring")]
    RingBreach { node: NodeId },

    #[error("link {direction:?} of node {node:?} is not mirrored by its neighbour")]
    LinkInconsistency { node: NodeId, direction: Compass },

    #[error("cannot carve a {width}x{height} image up to {target_width}x{target_height}")]
    Upscale {
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },
}

/// The orientation and length of a seam, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeamShape {
    pub orientation: Orientation,
    pub len: usize,
}

impl std::fmt::Display for SeamShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-pixel {:?}", self.len, self.orientation)
    }
}
