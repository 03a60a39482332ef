// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel lattice
//!
//! An image becomes a grid of nodes, each linked to its four
//! neighbours, wrapped in a one-node-thick ring of sentinels.  The
//! sentinels on the outer edge link to themselves on their outward
//! side, so walking off the lattice in any direction simply stays
//! put.  All traversal starts from the access point, the top-left
//! sentinel; the first pixel is one step south and one step east of
//! it.  Since the lattice is edited by relinking rather than by
//! moving memory, nothing but the links knows where a node "is": the
//! dimensions tracked here are the only other source of truth.

use crate::cq;
use crate::error::CarveError;
use crate::node::{Compass, Node, NodeId, NodeKind};
use crate::seam::{Orientation, Seam};
use image::{GenericImageView, ImageBuffer, Pixel, Rgba, RgbaImage};
use itertools::iproduct;
use std::iter;
use tracing::{debug, instrument};

/// The colour a sentinel would render as, were it ever rendered.
const NO_COLOR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// The linked pixel lattice, plus the history of seams cut from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    // Both dimensions count the sentinel ring.
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) access: NodeId,
    pub(crate) nodes: Vec<Node>,
    pub(crate) history: Vec<Seam>,
}

impl Grid {
    /// Builds a lattice from row-major pixel data.  `pixels` must hold
    /// exactly `width * height` colours, and neither dimension may be
    /// zero.
    #[instrument(skip(pixels))]
    pub fn from_pixels(pixels: &[Rgba<u8>], width: u32, height: u32) -> Result<Self, CarveError> {
        let invalid = CarveError::InvalidDimensions {
            width,
            height,
            pixels: pixels.len(),
        };
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(invalid);
        }

        let (lw, lh) = (width + 2, height + 2);
        if u32::try_from(u64::from(lw) * u64::from(lh)).is_err() {
            return Err(invalid);
        }
        let (mw, mh) = (lw - 1, lh - 1);
        let id = |x: u32, y: u32| NodeId(y * lw + x);

        let mut nodes: Vec<Node> = iproduct!(0..lh, 0..lw)
            .map(|(y, x)| {
                let kind = cq!(
                    x == 0 || y == 0 || x == mw || y == mh,
                    NodeKind::Border,
                    NodeKind::Interior(pixels[((y - 1) * width + (x - 1)) as usize])
                );
                Node::unlinked(id(x, y), kind)
            })
            .collect();

        // Every node faces its grid neighbour; the outward side of a
        // sentinel on the edge keeps pointing at itself.
        for (y, x) in iproduct!(0..lh, 0..lw) {
            let node = &mut nodes[id(x, y).index()];
            node.set_link(Compass::North, cq!(y == 0, id(x, y), id(x, y - 1)));
            node.set_link(Compass::South, cq!(y == mh, id(x, y), id(x, y + 1)));
            node.set_link(Compass::West, cq!(x == 0, id(x, y), id(x - 1, y)));
            node.set_link(Compass::East, cq!(x == mw, id(x, y), id(x + 1, y)));
        }

        debug!(width, height, nodes = nodes.len(), "built lattice");
        Ok(Grid {
            width: lw,
            height: lh,
            access: id(0, 0),
            nodes,
            history: Vec::new(),
        })
    }

    /// Builds a lattice from any 8-bit image, converting each pixel to
    /// RGBA.
    pub fn from_image<I, P>(image: &I) -> Result<Self, CarveError>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = u8>,
    {
        let (width, height) = image.dimensions();
        let pixels: Vec<Rgba<u8>> = iproduct!(0..height, 0..width)
            .map(|(y, x)| image.get_pixel(x, y).to_rgba())
            .collect();
        Self::from_pixels(&pixels, width, height)
    }

    /// The width and height of the image, not counting the sentinels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width - 2, self.height - 2)
    }

    /// The width and height of the whole lattice, sentinels included.
    pub fn lattice_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True once removing another seam in either direction would
    /// leave the image one pixel (or less) wide or tall.
    pub fn should_stop(&self) -> bool {
        let (width, height) = self.dimensions();
        width <= 2 || height <= 2
    }

    pub(crate) fn too_small(&self) -> CarveError {
        let (width, height) = self.dimensions();
        CarveError::GridTooSmall { width, height }
    }

    /// The top-left sentinel, from which every traversal begins.
    pub fn access_point(&self) -> NodeId {
        self.access
    }

    /// The top-left pixel of the image.
    pub fn first_pixel(&self) -> NodeId {
        self.walk(self.access, &[Compass::South, Compass::East])
    }

    /// The node behind a handle.
    ///
    /// # Panics
    ///
    /// Handles are only meaningful for the grid that issued them.  One
    /// from a larger grid indexes past the end of this grid's arena and
    /// panics; one from a grid of the same size silently names a
    /// different node.  The same holds for `neighbor`, `walk`, and `ray`.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn neighbor(&self, id: NodeId, direction: Compass) -> NodeId {
        self.node(id).link(direction)
    }

    /// Follows a sequence of single steps, e.g. north-then-east to
    /// reach the north-eastern neighbour.
    pub fn walk(&self, from: NodeId, steps: &[Compass]) -> NodeId {
        steps.iter().fold(from, |at, step| self.neighbor(at, *step))
    }

    /// Every node reached by stepping repeatedly in one direction,
    /// starting with `from` itself.  Never ends: sentinels link to
    /// themselves on the outside, so bound it with `take`.
    pub fn ray(&self, from: NodeId, direction: Compass) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(Some(from), move |at| Some(self.neighbor(*at, direction)))
    }

    pub(crate) fn set_link(&mut self, id: NodeId, direction: Compass, to: NodeId) {
        self.nodes[id.index()].set_link(direction, to);
    }

    pub(crate) fn set_color(&mut self, id: NodeId, color: Rgba<u8>) {
        let node = &mut self.nodes[id.index()];
        if let NodeKind::Interior(_) = node.kind {
            node.kind = NodeKind::Interior(color);
        }
    }

    /// The lattice dimension, sentinels included, that a seam of the
    /// given orientation cuts across.
    pub(crate) fn across_mut(&mut self, orientation: Orientation) -> &mut u32 {
        match orientation {
            Orientation::Vertical => &mut self.width,
            Orientation::Horizontal => &mut self.height,
        }
    }

    /// How many seams are waiting in the undo history.
    pub fn removed(&self) -> usize {
        self.history.len()
    }

    /// The most recently removed seam, if any.
    pub fn last_removed(&self) -> Option<&Seam> {
        self.history.last()
    }

    /// The pixels of the image, row by row.
    pub fn pixel_rows(&self) -> Vec<Vec<NodeId>> {
        let (width, height) = self.dimensions();
        self.ray(self.first_pixel(), Compass::South)
            .take(height as usize)
            .map(|start| self.ray(start, Compass::East).take(width as usize).collect())
            .collect()
    }

    /// Where a live pixel currently sits in the image, as `(x, y)`.
    pub fn locate(&self, id: NodeId) -> Option<(u32, u32)> {
        self.pixel_rows().iter().enumerate().find_map(|(y, row)| {
            row.iter()
                .position(|at| *at == id)
                .map(|x| (x as u32, y as u32))
        })
    }

    /// Every live node, sentinels included, row by row from the access
    /// point.  Two lattices with the same layout and the same links
    /// are the same picture.
    pub fn layout(&self) -> Vec<Vec<NodeId>> {
        self.ray(self.access, Compass::South)
            .take(self.height as usize)
            .map(|start| self.ray(start, Compass::East).take(self.width as usize).collect())
            .collect()
    }

    /// Checks every live node against its neighbours: each link must
    /// point at the node's grid neighbour and be mirrored by that
    /// neighbour's opposite link, the outward links of the sentinel
    /// ring must be self-links, and the ring must hold only sentinels.
    /// A failure here is a bug in the surgery, never a user error.
    pub fn validate_links(&self) -> Result<(), CarveError> {
        let layout = self.layout();
        let (mw, mh) = (self.width as usize - 1, self.height as usize - 1);

        for (y, row) in layout.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                let on_ring = x == 0 || y == 0 || x == mw || y == mh;
                if on_ring != self.node(id).is_border() {
                    return Err(CarveError::RingBreach { node: id });
                }

                let expected = |direction: Compass| match direction {
                    Compass::North => cq!(y == 0, id, layout[y - 1][x]),
                    Compass::South => cq!(y == mh, id, layout[y + 1][x]),
                    Compass::West => cq!(x == 0, id, layout[y][x - 1]),
                    Compass::East => cq!(x == mw, id, layout[y][x + 1]),
                };

                for &direction in Compass::ALL.iter() {
                    let to = self.neighbor(id, direction);
                    let mirrored = to == id || self.neighbor(to, direction.opposite()) == id;
                    if to != expected(direction) || !mirrored {
                        return Err(CarveError::LinkInconsistency { node: id, direction });
                    }
                }
            }
        }
        Ok(())
    }

    /// The image as it currently stands.
    pub fn render_colors(&self) -> RgbaImage {
        let (width, height) = self.dimensions();
        let mut out: RgbaImage = ImageBuffer::new(width, height);
        for (y, row) in self.pixel_rows().into_iter().enumerate() {
            for (x, id) in row.into_iter().enumerate() {
                let color = self.node(id).color().unwrap_or(NO_COLOR);
                out.put_pixel(x as u32, y as u32, color);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn shade(v: u8) -> Rgba<u8> {
        Rgba([v, v, v, 255])
    }

    fn numbered(width: u32, height: u32) -> Vec<Rgba<u8>> {
        (0..width * height).map(|i| shade(i as u8)).collect()
    }

    #[test]
    fn rejects_mismatched_buffers() {
        let pixels = numbered(3, 3);
        assert_eq!(
            Grid::from_pixels(&pixels, 4, 3),
            Err(CarveError::InvalidDimensions {
                width: 4,
                height: 3,
                pixels: 9
            })
        );
        assert!(Grid::from_pixels(&[], 0, 0).is_err());
    }

    #[test]
    fn lattice_is_wrapped_in_sentinels() {
        let grid = Grid::from_pixels(&numbered(4, 4), 4, 4).unwrap();
        assert_eq!(grid.dimensions(), (4, 4));
        assert_eq!(grid.lattice_dimensions(), (6, 6));

        let layout = grid.layout();
        assert_eq!(layout.len(), 6);
        assert!(layout.iter().all(|row| row.len() == 6));
        assert!(layout[0].iter().all(|id| grid.node(*id).is_border()));
        assert!(layout[5].iter().all(|id| grid.node(*id).is_border()));
        assert!(layout.iter().all(|row| grid.node(row[0]).is_border()));
        assert!(layout.iter().all(|row| grid.node(row[5]).is_border()));
        assert_eq!(grid.validate_links(), Ok(()));
    }

    #[test]
    fn first_pixel_is_south_then_east_of_access() {
        let grid = Grid::from_pixels(&numbered(4, 4), 4, 4).unwrap();
        let first = grid.first_pixel();
        assert_eq!(grid.node(first).color(), Some(shade(0)));
        assert!(grid.node(grid.access_point()).is_border());
    }

    #[test]
    fn neighbours_follow_the_grid() {
        let grid = Grid::from_pixels(&numbered(4, 4), 4, 4).unwrap();
        let rows = grid.pixel_rows();
        let (a, b) = (rows[2][2], rows[1][2]);
        assert_eq!(grid.neighbor(a, Compass::North), b);
        assert_eq!(grid.walk(rows[3][1], &[Compass::North, Compass::East]), a);
        assert_eq!(grid.walk(rows[1][2], &[Compass::South, Compass::South]), rows[3][2]);
        assert_eq!(grid.node(rows[1][3]).color(), Some(shade(7)));
    }

    #[test]
    fn outward_sentinel_links_are_self_links() {
        let grid = Grid::from_pixels(&numbered(4, 4), 4, 4).unwrap();
        let layout = grid.layout();
        let top = layout[0][2];
        let right = layout[3][5];
        let left = layout[2][0];
        let bottom = layout[5][1];
        assert_eq!(grid.neighbor(top, Compass::North), top);
        assert_eq!(grid.neighbor(right, Compass::East), right);
        assert_eq!(grid.neighbor(left, Compass::West), left);
        assert_eq!(grid.neighbor(bottom, Compass::South), bottom);
        assert_eq!(grid.walk(left, &[Compass::West, Compass::West]), left);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn foreign_handles_from_a_larger_grid_panic() {
        let small = Grid::from_pixels(&numbered(3, 3), 3, 3).unwrap();
        let large = Grid::from_pixels(&numbered(9, 9), 9, 9).unwrap();
        let far = large.pixel_rows()[8][8];
        small.node(far);
    }

    #[test]
    fn single_pixel_lattice() {
        let grid = Grid::from_pixels(&[shade(200)], 1, 1).unwrap();
        assert_eq!(grid.dimensions(), (1, 1));
        assert!(grid.should_stop());
        assert_eq!(grid.validate_links(), Ok(()));
    }

    #[test]
    fn should_stop_at_two_pixels() {
        let three = Grid::from_pixels(&numbered(3, 3), 3, 3).unwrap();
        assert!(!three.should_stop());
        let narrow = Grid::from_pixels(&numbered(2, 5), 2, 5).unwrap();
        assert!(narrow.should_stop());
        let short = Grid::from_pixels(&numbered(5, 2), 5, 2).unwrap();
        assert!(short.should_stop());
    }

    #[test]
    fn validation_catches_a_broken_link() {
        let mut grid = Grid::from_pixels(&numbered(3, 3), 3, 3).unwrap();
        let rows = grid.pixel_rows();
        grid.set_link(rows[1][1], Compass::South, rows[1][2]);
        assert_eq!(
            grid.validate_links(),
            Err(CarveError::LinkInconsistency {
                node: rows[1][1],
                direction: Compass::South
            })
        );
    }

    #[test]
    fn renders_the_original_pixels() {
        let pixels = numbered(3, 2);
        let grid = Grid::from_pixels(&pixels, 3, 2).unwrap();
        let image = grid.render_colors();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(*image.get_pixel(2, 1), shade(5));
        assert_eq!(*image.get_pixel(0, 0), shade(0));
    }

    #[test]
    fn builds_from_a_grey_image() {
        let gray: GrayImage = ImageBuffer::from_fn(3, 2, |x, y| Luma([(y * 3 + x) as u8 * 10]));
        let grid = Grid::from_image(&gray).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(*grid.render_colors().get_pixel(1, 1), shade(40));
    }
}
