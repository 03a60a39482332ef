// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam surgery
//!
//! Cutting a seam out of the lattice, and stitching it back in.
//!
//! Removal closes the lattice over each seam node: its left and right
//! neighbours are linked to each other.  Where the seam steps
//! diagonally from one lane to the next, the neighbour on the side it
//! stepped towards slides into the removed node's place, so its
//! forward link is pointed at the node straight ahead of the removed
//! one.  The two sentinels at the seam's ends (above and below a
//! vertical seam, left and right of a horizontal one) are closed over
//! the same way, which keeps the sentinel ring the right size.
//!
//! None of this ever writes to a removed node.  Its links still
//! describe the lattice as it was just before the cut, which is all
//! undo needs: each node of the seam asks its neighbours to point back
//! at it.  Undo is strictly last-in, first-out.

use crate::error::{CarveError, SeamShape};
use crate::flipper::Frame;
use crate::grid::Grid;
use crate::node::{Compass, NodeId};
use crate::seam::{Orientation, Seam};
use image::Rgba;
use itertools::Itertools;
use tracing::{debug, instrument, trace, warn};

impl Grid {
    /// Removes a vertical seam, narrowing the image by one pixel.  The
    /// seam joins the undo history.
    ///
    /// A seam is only meaningful for the grid whose search produced it.
    /// The checks here are structural: a seam that does not trace live,
    /// connected pixels from edge to edge is refused, but a seam from
    /// another grid of the same shape traces just such a path and is
    /// cut as given, weights and all.
    pub fn remove_vertical_seam(&mut self, seam: Seam) -> Result<(), CarveError> {
        self.check_seam(Orientation::Vertical, &seam)?;
        self.cut(seam);
        Ok(())
    }

    /// Removes a horizontal seam, shortening the image by one pixel.
    /// The seam joins the undo history.
    pub fn remove_horizontal_seam(&mut self, seam: Seam) -> Result<(), CarveError> {
        self.check_seam(Orientation::Horizontal, &seam)?;
        self.cut(seam);
        Ok(())
    }

    /// Removes a seam of either orientation.
    pub fn remove_seam(&mut self, seam: Seam) -> Result<(), CarveError> {
        match seam.orientation() {
            Orientation::Vertical => self.remove_vertical_seam(seam),
            Orientation::Horizontal => self.remove_horizontal_seam(seam),
        }
    }

    /// Puts the most recently removed seam back.  Returns the
    /// orientation of the restored seam, or `None` (having done
    /// nothing) if there was nothing to undo.
    #[instrument(skip_all)]
    pub fn undo_last_removal(&mut self) -> Option<Orientation> {
        let seam = self.history.pop()?;
        let orientation = seam.orientation();
        let frame = Frame::of(orientation);

        if let Some(terminal) = seam.terminal() {
            let beyond = self.neighbor(terminal.node, frame.forward);
            self.reopen_across(beyond, frame);
        }
        for link in seam.iter_back() {
            self.restore(link.node);
        }
        if let Some(origin) = seam.origin() {
            let before = self.neighbor(origin.node, frame.backward);
            self.reopen_across(before, frame);
        }
        *self.across_mut(orientation) += 1;

        debug!(?orientation, dimensions = ?self.dimensions(), "restored seam");
        Some(orientation)
    }

    /// Paints every pixel of a seam, e.g. to show it before it goes.
    pub fn highlight_seam(&mut self, seam: &Seam, color: Rgba<u8>) {
        for node in seam.nodes() {
            self.set_color(node, color);
        }
    }

    // The number of lanes a seam of this orientation crosses, which
    // is also its length.
    fn lanes(&self, orientation: Orientation) -> usize {
        let (width, height) = self.dimensions();
        match orientation {
            Orientation::Vertical => height as usize,
            Orientation::Horizontal => width as usize,
        }
    }

    // A seam can only be cut if it is exactly what a search of the
    // lattice as it stands could have returned: the right shape, every
    // node a live pixel, each one a step ahead of the last, running
    // from one side of the sentinel ring to the other.  Checked before
    // anything is touched.
    fn check_seam(&self, expected: Orientation, seam: &Seam) -> Result<(), CarveError> {
        let lanes = self.lanes(expected);
        if seam.orientation() != expected || seam.len() != lanes {
            return Err(CarveError::SeamMismatch {
                expected: SeamShape {
                    orientation: expected,
                    len: lanes,
                },
                found: SeamShape {
                    orientation: seam.orientation(),
                    len: seam.len(),
                },
            });
        }

        let (width, height) = self.dimensions();
        let across = match expected {
            Orientation::Vertical => width,
            Orientation::Horizontal => height,
        };
        if across <= 1 {
            return Err(self.too_small());
        }

        let frame = Frame::of(expected);
        let live = |id: NodeId| {
            id.index() < self.nodes.len()
                && !self.node(id).is_border()
                && Compass::ALL
                    .iter()
                    .all(|d| self.neighbor(self.neighbor(id, *d), d.opposite()) == id)
        };
        let follows = |behind: NodeId, ahead: NodeId| {
            let straight = self.neighbor(behind, frame.forward);
            ahead == straight
                || ahead == self.neighbor(straight, frame.left)
                || ahead == self.neighbor(straight, frame.right)
        };

        let anchored = match (seam.origin(), seam.terminal()) {
            (Some(origin), Some(terminal)) => {
                live(origin.node)
                    && live(terminal.node)
                    && self.node(self.neighbor(origin.node, frame.backward)).is_border()
                    && self.node(self.neighbor(terminal.node, frame.forward)).is_border()
            }
            _ => false,
        };
        let connected = anchored
            && seam.nodes().all(live)
            && seam.nodes().tuple_windows().all(|(behind, ahead)| follows(behind, ahead));

        if !connected {
            warn!(orientation = ?expected, "refusing to cut a stale seam");
            return Err(CarveError::StaleSeam);
        }
        Ok(())
    }

    #[instrument(skip_all)]
    fn cut(&mut self, seam: Seam) {
        let orientation = seam.orientation();
        let frame = Frame::of(orientation);
        let links = seam.links();

        if let Some(terminal) = seam.terminal() {
            let beyond = self.neighbor(terminal.node, frame.forward);
            self.close_across(beyond, frame);
            self.close_across(terminal.node, frame);
        }

        // Walk from the terminal back to the origin, closing over each
        // node once the node ahead of it is gone.
        for pair in links.windows(2).rev() {
            let (behind, ahead) = (pair[0].node, pair[1].node);
            let straight = self.neighbor(behind, frame.forward);
            let right = self.neighbor(behind, frame.right);
            let left = self.neighbor(behind, frame.left);

            if self.neighbor(right, frame.forward) == ahead {
                trace!(?behind, "seam stepped right");
                self.set_link(right, frame.forward, straight);
                self.set_link(straight, frame.backward, right);
            } else if self.neighbor(left, frame.forward) == ahead {
                trace!(?behind, "seam stepped left");
                self.set_link(left, frame.forward, straight);
                self.set_link(straight, frame.backward, left);
            }
            self.close_across(behind, frame);
        }

        if let Some(origin) = seam.origin() {
            let before = self.neighbor(origin.node, frame.backward);
            self.close_across(before, frame);
        }

        *self.across_mut(orientation) -= 1;
        debug!(
            ?orientation,
            weight = seam.total_weight(),
            dimensions = ?self.dimensions(),
            "removed seam"
        );
        self.history.push(seam);
    }

    // Links a node's left and right neighbours to each other, dropping
    // the node out of its lane.
    fn close_across(&mut self, id: NodeId, frame: Frame) {
        let left = self.neighbor(id, frame.left);
        let right = self.neighbor(id, frame.right);
        self.set_link(left, frame.right, right);
        self.set_link(right, frame.left, left);
    }

    // The reverse of `close_across`, for a node whose own links were
    // left untouched.
    fn reopen_across(&mut self, id: NodeId, frame: Frame) {
        let left = self.neighbor(id, frame.left);
        let right = self.neighbor(id, frame.right);
        self.set_link(left, frame.right, id);
        self.set_link(right, frame.left, id);
    }

    // Makes each of a removed node's four neighbours point back at it.
    fn restore(&mut self, id: NodeId) {
        for &direction in Compass::ALL.iter() {
            let neighbor = self.neighbor(id, direction);
            if neighbor != id {
                self.set_link(neighbor, direction.opposite(), id);
            }
        }
    }
}
