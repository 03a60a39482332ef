// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lattice direction flipper
//!
//! A horizontal seam is a vertical seam in a lattice turned 90°.
//! Rather than write every search and every surgery twice, the code
//! speaks in terms of a `Frame`: "forward" is the direction the seam
//! travels in, "right" is the direction across it.  For a vertical
//! seam forward is south and right is east; for a horizontal seam
//! the axes swap, forward is east and right is south.  Mapping north
//! to west and south to east is exactly a transpose, so the left and
//! right neighbours of a node keep the same order in both frames.

use crate::node::Compass;
use crate::seam::Orientation;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Frame {
    pub forward: Compass,
    pub backward: Compass,
    pub right: Compass,
    pub left: Compass,
}

impl Frame {
    pub fn of(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => Frame {
                forward: Compass::South,
                backward: Compass::North,
                right: Compass::East,
                left: Compass::West,
            },
            Orientation::Horizontal => Frame {
                forward: Compass::East,
                backward: Compass::West,
                right: Compass::South,
                left: Compass::North,
            },
        }
    }
}
