// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lattice nodes
//!
//! Every pixel of the image, and every cell of the one-node-thick
//! sentinel ring around it, is a `Node` living in a flat arena owned
//! by the `Grid`.  In lieu of pointers, which are generally not
//! welcome in Rust, each node carries the arena indices of its four
//! neighbours.  Removing a seam is then nothing more than rewriting a
//! handful of those indices.

use image::Rgba;

/// The arena index of a node.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The four directions a node links in.  The discriminant doubles as
/// the index into `Node::links`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Compass {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Compass {
    pub const ALL: [Compass; 4] = [Compass::North, Compass::East, Compass::South, Compass::West];

    /// The direction that leads back.
    pub fn opposite(self) -> Self {
        match self {
            Compass::North => Compass::South,
            Compass::East => Compass::West,
            Compass::South => Compass::North,
            Compass::West => Compass::East,
        }
    }
}

/// What a node holds.  Pixels carry a colour; sentinels carry
/// nothing and have zero brightness.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NodeKind {
    Interior(Rgba<u8>),
    Border,
}

/// A single cell of the lattice.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) links: [NodeId; 4],
}

impl Node {
    /// A node whose four links all point at itself.  The grid builder
    /// rewires the inward-facing ones.
    pub(crate) fn unlinked(id: NodeId, kind: NodeKind) -> Self {
        Node {
            kind,
            links: [id; 4],
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_border(&self) -> bool {
        self.kind == NodeKind::Border
    }

    /// The pixel colour, or `None` for a sentinel.
    pub fn color(&self) -> Option<Rgba<u8>> {
        match self.kind {
            NodeKind::Interior(color) => Some(color),
            NodeKind::Border => None,
        }
    }

    pub fn link(&self, direction: Compass) -> NodeId {
        self.links[direction as usize]
    }

    pub(crate) fn set_link(&mut self, direction: Compass, to: NodeId) {
        self.links[direction as usize] = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_pair_up() {
        for direction in Compass::ALL.iter() {
            assert_eq!(direction.opposite().opposite(), *direction);
            assert_ne!(direction.opposite(), *direction);
        }
    }

    #[test]
    fn unlinked_nodes_point_at_themselves() {
        let id = NodeId(7);
        let node = Node::unlinked(id, NodeKind::Border);
        assert!(Compass::ALL.iter().all(|d| node.link(*d) == id));
        assert!(node.is_border());
        assert_eq!(node.color(), None);
    }

    #[test]
    fn interior_nodes_carry_their_colour() {
        let blue = Rgba([142, 207, 242, 255]);
        let mut node = Node::unlinked(NodeId(0), NodeKind::Interior(blue));
        node.set_link(Compass::East, NodeId(1));
        assert_eq!(node.color(), Some(blue));
        assert_eq!(node.link(Compass::East), NodeId(1));
        assert_eq!(node.link(Compass::West), NodeId(0));
    }
}
