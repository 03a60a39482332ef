// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a pixel
//!
//! The energy of a pixel is the magnitude of the brightness gradient
//! around it, measured with a Sobel kernel over its eight neighbours.
//! The diagonal neighbours are reached by two single steps, so the
//! calculation follows the lattice links as they stand *now*: after a
//! seam is cut out, the pixels along it see new neighbours and their
//! energy changes with them.  Nothing is cached.  Sentinels have no
//! brightness, which makes the edges of the image read as a transition
//! to black.

use crate::grid::Grid;
use crate::node::{Compass, NodeId, NodeKind};
use crate::twodmap::TwoDimensionalMap;
use image::{GrayImage, ImageBuffer, Luma, Rgba};

use crate::node::Compass::{East, North, South, West};

/// The brightness of a colour, in [0, 1]: the mean of its red, green,
/// and blue channels (integer mean, alpha ignored) over 255.
pub fn color_brightness(color: Rgba<u8>) -> f64 {
    let [r, g, b, _] = color.0;
    let mean = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
    f64::from(mean) / 255.0
}

/// The brightness of a node; zero for a sentinel.
pub fn brightness(grid: &Grid, id: NodeId) -> f64 {
    match grid.node(id).kind() {
        NodeKind::Interior(color) => color_brightness(color),
        NodeKind::Border => 0.0,
    }
}

/// The energy of a node; zero for a sentinel.
///
/// ```text
///   horizontal = (NW + 2W + SW) - (NE + 2E + SE)
///   vertical   = (NW + 2N + NE) - (SW + 2S + SE)
///   energy     = √(horizontal² + vertical²)
/// ```
pub fn energy(grid: &Grid, id: NodeId) -> f64 {
    if grid.node(id).is_border() {
        return 0.0;
    }

    let b = |steps: &[Compass]| brightness(grid, grid.walk(id, steps));
    let (n, s, w, e) = (b(&[North]), b(&[South]), b(&[West]), b(&[East]));
    let (nw, ne) = (b(&[North, West]), b(&[North, East]));
    let (sw, se) = (b(&[South, West]), b(&[South, East]));

    let horizontal = (nw + 2.0 * w + sw) - (ne + 2.0 * e + se);
    let vertical = (nw + 2.0 * n + ne) - (sw + 2.0 * s + se);
    (horizontal * horizontal + vertical * vertical).sqrt()
}

impl Grid {
    /// The energy of one node.
    pub fn energy_of(&self, id: NodeId) -> f64 {
        energy(self, id)
    }

    /// The highest energy of any pixel in the image.
    pub fn max_energy(&self) -> f64 {
        self.pixel_rows()
            .iter()
            .flatten()
            .map(|id| energy(self, *id))
            .fold(0.0, f64::max)
    }

    /// The energy of every pixel, scaled so the most energetic pixel
    /// is 1.0.  An image with no energy anywhere maps to all zeros.
    pub fn render_energy_map(&self) -> TwoDimensionalMap<f64> {
        let raw = TwoDimensionalMap::from_rows(
            self.pixel_rows()
                .iter()
                .map(|row| row.iter().map(|id| energy(self, *id)).collect())
                .collect(),
        );
        let factor = raw.as_slice().iter().cloned().fold(0.0, f64::max);
        if factor <= 0.0 {
            return raw;
        }
        raw.map(|e| e / factor)
    }

    /// The normalised energy map as a greyscale image, brightest where
    /// the energy is highest.
    pub fn energy_image(&self) -> GrayImage {
        let map = self.render_energy_map();
        ImageBuffer::from_fn(map.width, map.height, |x, y| {
            let scaled = (map[(x, y)] * 255.0).round();
            let level = num_traits::cast::<f64, u8>(scaled).unwrap_or(u8::MAX);
            Luma([level])
        })
    }
}
