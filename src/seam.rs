// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seams
//!
//! A seam is a chain of lattice nodes, one per row (vertical) or one
//! per column (horizontal), together with the cumulative energy of
//! the path up to and including each node.  It is a plain value: it
//! refers to nodes by arena index and owns no graph structure of its
//! own, so it stays valid as a record after the nodes it names have
//! been cut out of the lattice.  Those indices mean nothing to any
//! other lattice.

use crate::node::NodeId;

/// Which way a seam runs.  A vertical seam runs top to bottom and
/// removing it narrows the image; a horizontal seam runs left to
/// right and removing it shortens the image.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The other orientation.
    pub fn turn(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

/// One step of a seam: the node, and the total energy of the path
/// from the seam's origin through this node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SeamLink {
    pub node: NodeId,
    pub weight: f64,
}

/// A complete seam, stored origin first.  The origin is the node in
/// the top row (vertical) or left column (horizontal); the terminal
/// is the node in the last row or column, and carries the seam's
/// total weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Seam {
    orientation: Orientation,
    links: Vec<SeamLink>,
}

impl Seam {
    pub(crate) fn new(orientation: Orientation, links: Vec<SeamLink>) -> Self {
        Seam { orientation, links }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The number of nodes in the seam: the height of the image for a
    /// vertical seam, its width for a horizontal one.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The first node of the seam, where the search began.
    pub fn origin(&self) -> Option<&SeamLink> {
        self.links.first()
    }

    /// The last node of the seam, holding the full path weight.
    pub fn terminal(&self) -> Option<&SeamLink> {
        self.links.last()
    }

    /// The summed energy of every node on the seam.
    pub fn total_weight(&self) -> f64 {
        self.terminal().map_or(0.0, |link| link.weight)
    }

    /// The links from origin to terminal.
    pub fn links(&self) -> &[SeamLink] {
        &self.links
    }

    /// Walks the seam backwards, from the terminal to the origin, the
    /// way the search discovered it.
    pub fn iter_back(&self) -> impl Iterator<Item = &SeamLink> + '_ {
        self.links.iter().rev()
    }

    /// The nodes of the seam, origin first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.links.iter().map(|link| link.node)
    }
}
