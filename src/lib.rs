// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving over a four-way linked pixel lattice.
//!
//! An image is loaded into a [`Grid`]: every pixel is a node linked to
//! its north, east, south, and west neighbours, and the whole image is
//! wrapped in a ring of sentinel nodes.  Seams are found with
//! [`SeamFinder`], cut out by relinking the lattice around them, and
//! can be put back again in the reverse order they were cut.
//! [`SeamCarver`] drives the whole process.

mod ternary;

pub mod config;
pub mod energy;
pub mod error;
mod flipper;
pub mod grid;
pub mod node;
pub mod seam;
pub mod seamcarver;
pub mod seamfinder;
mod surgery;
pub mod twodmap;

pub use config::{CarveConfig, CarveOrder};
pub use energy::{brightness, color_brightness, energy};
pub use error::{CarveError, SeamShape};
pub use grid::Grid;
pub use node::{Compass, Node, NodeId, NodeKind};
pub use seam::{Orientation, Seam, SeamLink};
pub use seamcarver::SeamCarver;
pub use seamfinder::SeamFinder;
pub use twodmap::TwoDimensionalMap;
