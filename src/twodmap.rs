// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ops::{Index, IndexMut};

/// A rectangle of values, row-major, addressed as `(x, y)`.  The
/// lattice is a linked structure with no coordinates of its own; this
/// is what it flattens into when something outside the crate (a
/// renderer, a test) needs a plain rectangle of values.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A map filled with the content type's default.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Flattens rows of equal length, as walked off the lattice.
    pub(crate) fn from_rows(rows: Vec<Vec<P>>) -> Self {
        let width = rows.first().map_or(0, Vec::len) as u32;
        let height = rows.len() as u32;
        let data: Vec<P> = rows.into_iter().flatten().collect();
        debug_assert_eq!(data.len(), width as usize * height as usize);
        TwoDimensionalMap {
            width,
            height,
            data,
        }
    }

    // All the index math lives here.
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// The values in row-major order.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    /// One row of the map.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.offset(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// A map of the same shape with `f` applied to every value.
    pub fn map<Q, F>(&self, f: F) -> TwoDimensionalMap<Q>
    where
        Q: Default + Copy,
        F: Fn(P) -> Q,
    {
        TwoDimensionalMap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|p| f(*p)).collect(),
        }
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        &self.data[self.offset(x, y)]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let at = self.offset(x, y);
        &mut self.data[at]
    }
}
