// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The driver
//!
//! Owns a lattice and carves it down, either one seam at a time
//! (optionally marking each seam before it goes, so it can be shown)
//! or straight to a target size.

use crate::config::{CarveConfig, CarveOrder};
use crate::error::CarveError;
use crate::grid::Grid;
use crate::seam::{Orientation, Seam};
use crate::seamfinder::SeamFinder;
use image::Rgba;
use tracing::{debug, info, instrument};

// A seam that has been found and painted but not yet cut, with the
// colours it had before painting.
#[derive(Clone, Debug)]
struct Marked {
    seam: Seam,
    colors: Vec<Rgba<u8>>,
}

/// A struct for holding the image to be carved.
#[derive(Clone, Debug)]
pub struct SeamCarver {
    grid: Grid,
    config: CarveConfig,
    marked: Option<Marked>,
}

impl SeamCarver {
    pub fn new(grid: Grid, config: CarveConfig) -> Self {
        SeamCarver {
            grid,
            config,
            marked: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &CarveConfig {
        &self.config
    }

    /// Gives up the lattice, first unpainting any marked seam.
    pub fn into_grid(mut self) -> Grid {
        self.discard();
        self.grid
    }

    /// The current image dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }

    /// The number of seams removed and not undone.
    pub fn removed(&self) -> usize {
        self.grid.removed()
    }

    /// The seam marked for removal, if any.
    pub fn marked(&self) -> Option<&Seam> {
        self.marked.as_ref().map(|m| &m.seam)
    }

    /// Finds the cheapest seam and paints it in the configured seam
    /// colour, without removing it.  Replaces any seam already marked.
    pub fn mark(&mut self, orientation: Orientation) -> Result<&Seam, CarveError> {
        self.discard();
        let seam = self.grid.find_seam(orientation)?;
        let colors = seam
            .nodes()
            .filter_map(|id| self.grid.node(id).color())
            .collect();
        self.grid.highlight_seam(&seam, self.config.seam_color);
        let marked = self.marked.insert(Marked { seam, colors });
        Ok(&marked.seam)
    }

    /// Removes the marked seam.  Returns `false` if nothing was marked.
    pub fn commit(&mut self) -> Result<bool, CarveError> {
        let Some(Marked { seam, colors }) = self.marked.take() else {
            return Ok(false);
        };
        // Unpaint first, so an undo brings back the real pixels.
        self.repaint(&seam, &colors);
        self.grid.remove_seam(seam)?;
        Ok(true)
    }

    /// Unpaints and forgets the marked seam, if any.
    pub fn discard(&mut self) {
        if let Some(Marked { seam, colors }) = self.marked.take() {
            self.repaint(&seam, &colors);
        }
    }

    /// Finds and removes the cheapest seam of one orientation.
    pub fn step(&mut self, orientation: Orientation) -> Result<(), CarveError> {
        self.discard();
        let seam = self.grid.find_seam(orientation)?;
        self.grid.remove_seam(seam)
    }

    /// Puts the most recently removed seam back.  A marked seam is
    /// discarded first.
    pub fn undo(&mut self) -> Option<Orientation> {
        self.discard();
        self.grid.undo_last_removal()
    }

    /// Given a desired new width and height, repeatedly carve seams
    /// out of the image, in the configured order.  Stops with
    /// `GridTooSmall` if the image runs out of seams first; whatever
    /// was carved up to that point stays carved.
    #[instrument(skip(self))]
    pub fn carve_to(&mut self, width: u32, height: u32) -> Result<(), CarveError> {
        let (current_width, current_height) = self.dimensions();
        if width > current_width || height > current_height {
            return Err(CarveError::Upscale {
                width: current_width,
                height: current_height,
                target_width: width,
                target_height: height,
            });
        }
        self.discard();

        let mut direction = match self.config.order {
            CarveOrder::HeightFirst => Orientation::Horizontal,
            CarveOrder::Alternate | CarveOrder::WidthFirst => Orientation::Vertical,
        };
        loop {
            let (w, h) = self.dimensions();
            let orientation = match (w > width, h > height) {
                (false, false) => break,
                (true, false) => Orientation::Vertical,
                (false, true) => Orientation::Horizontal,
                (true, true) => direction,
            };
            self.step(orientation)?;
            debug!(?orientation, dimensions = ?self.dimensions(), "carved");
            if self.config.order == CarveOrder::Alternate {
                direction = orientation.turn();
            }
        }

        info!(width, height, removed = self.removed(), "carved to size");
        Ok(())
    }

    fn repaint(&mut self, seam: &Seam, colors: &[Rgba<u8>]) {
        for (id, color) in seam.nodes().zip(colors.iter()) {
            self.grid.set_color(id, *color);
        }
    }
}
