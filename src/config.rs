// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving options.

use image::Rgba;

/// When an image has to lose both width and height, which seams go
/// first.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CarveOrder {
    /// Take turns, starting with a vertical seam.
    #[default]
    Alternate,
    /// All the vertical seams, then all the horizontal ones.
    WidthFirst,
    /// All the horizontal seams, then all the vertical ones.
    HeightFirst,
}

/// Options for a [`SeamCarver`](crate::SeamCarver).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CarveConfig {
    pub order: CarveOrder,
    /// The colour a marked seam is painted.
    pub seam_color: Rgba<u8>,
}

impl Default for CarveConfig {
    fn default() -> Self {
        CarveConfig {
            order: CarveOrder::default(),
            seam_color: Rgba([255, 0, 0, 255]),
        }
    }
}

impl CarveConfig {
    pub fn with_order(mut self, order: CarveOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_seam_color(mut self, seam_color: Rgba<u8>) -> Self {
        self.seam_color = seam_color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CarveConfig::default();
        assert_eq!(config.order, CarveOrder::Alternate);
        assert_eq!(config.seam_color, Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn builders_override_one_field_each() {
        let config = CarveConfig::default()
            .with_order(CarveOrder::HeightFirst)
            .with_seam_color(Rgba([0, 255, 0, 255]));
        assert_eq!(config.order, CarveOrder::HeightFirst);
        assert_eq!(config.seam_color, Rgba([0, 255, 0, 255]));
    }
}
