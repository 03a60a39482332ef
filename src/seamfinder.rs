// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam
//!
//! The classic dynamic program, run over the lattice links rather than
//! over coordinates.  The lattice is swept one lane at a time (a row
//! for a vertical seam, a column for a horizontal one); every pixel's
//! cumulative weight is its own energy plus the cheapest of the up to
//! three pixels behind it in the previous lane.  The pixels at either
//! end of a lane have only two candidates.  When candidates tie, the
//! first in left, straight, right order wins, so the same image always
//! yields the same seam.  The cheapest pixel of the final lane is the
//! seam's terminal, and following the back-pointers from it gives the
//! whole seam.

use crate::cq;
use crate::energy::energy;
use crate::error::CarveError;
use crate::flipper::Frame;
use crate::grid::Grid;
use crate::node::NodeId;
use crate::seam::{Orientation, Seam, SeamLink};
use tracing::{debug, instrument, trace};

/// Anything that can be asked for its cheapest seams.
pub trait SeamFinder {
    /// The cheapest top-to-bottom seam.
    fn find_vertical_seam(&self) -> Result<Seam, CarveError>;

    /// The cheapest left-to-right seam.
    fn find_horizontal_seam(&self) -> Result<Seam, CarveError>;

    /// The cheapest seam running in the given orientation.
    fn find_seam(&self, orientation: Orientation) -> Result<Seam, CarveError> {
        match orientation {
            Orientation::Vertical => self.find_vertical_seam(),
            Orientation::Horizontal => self.find_horizontal_seam(),
        }
    }
}

impl SeamFinder for Grid {
    fn find_vertical_seam(&self) -> Result<Seam, CarveError> {
        cheapest_seam(self, Orientation::Vertical)
    }

    fn find_horizontal_seam(&self) -> Result<Seam, CarveError> {
        cheapest_seam(self, Orientation::Horizontal)
    }
}

// One entry of the dynamic program: a pixel, the cheapest path
// weight that reaches it, and the entry that path came through.
#[derive(Copy, Clone, Debug)]
struct Step {
    node: NodeId,
    weight: f64,
    came_from: Option<usize>,
}

// Of the given steps, the cheapest; the earliest on a tie.
fn cheapest(steps: &[Step], among: &[usize]) -> Option<usize> {
    among
        .iter()
        .copied()
        .min_by(|a, b| steps[*a].weight.total_cmp(&steps[*b].weight))
}

#[instrument(skip(grid))]
fn cheapest_seam(grid: &Grid, orientation: Orientation) -> Result<Seam, CarveError> {
    if grid.should_stop() {
        return Err(grid.too_small());
    }

    let frame = Frame::of(orientation);
    let (width, height) = grid.dimensions();
    let (lane_len, lanes) = match orientation {
        Orientation::Vertical => (width as usize, height as usize),
        Orientation::Horizontal => (height as usize, width as usize),
    };

    let mut steps: Vec<Step> = Vec::with_capacity(lane_len * lanes);
    let mut previous: Vec<usize> = Vec::with_capacity(lane_len);
    let mut current: Vec<usize> = Vec::with_capacity(lane_len);
    let mut lane_start = grid.first_pixel();

    for lane in 0..lanes {
        for (i, node) in grid.ray(lane_start, frame.right).take(lane_len).enumerate() {
            let came_from = cq!(
                lane == 0,
                None,
                cheapest(
                    &steps,
                    &previous[cq!(i == 0, 0, i - 1)..=cq!(i + 1 == lane_len, i, i + 1)]
                )
            );
            let behind = came_from.map_or(0.0, |p| steps[p].weight);
            current.push(steps.len());
            steps.push(Step {
                node,
                weight: energy(grid, node) + behind,
                came_from,
            });
        }
        trace!(lane, "swept lane");
        std::mem::swap(&mut previous, &mut current);
        current.clear();
        lane_start = grid.neighbor(lane_start, frame.forward);
    }

    let mut links = Vec::with_capacity(lanes);
    let mut at = cheapest(&steps, &previous);
    while let Some(i) = at {
        let step = steps[i];
        links.push(SeamLink {
            node: step.node,
            weight: step.weight,
        });
        at = step.came_from;
    }
    links.reverse();

    let seam = Seam::new(orientation, links);
    debug!(?orientation, weight = seam.total_weight(), "found seam");
    Ok(seam)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Compass;
    use image::Rgba;
    use itertools::Itertools;

    const BLUE: Rgba<u8> = Rgba([142, 207, 242, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // Light blue, with a white 2x2 block in rows 1-2, columns 0-1.
    fn blocked() -> Grid {
        let mut pixels = vec![BLUE; 16];
        for (y, x) in [(1, 0), (1, 1), (2, 0), (2, 1)].iter() {
            pixels[y * 4 + x] = WHITE;
        }
        Grid::from_pixels(&pixels, 4, 4).unwrap()
    }

    // The blocked image with one more white pixel at (2, 2).
    fn five_white() -> Grid {
        let mut pixels = vec![BLUE; 16];
        for (y, x) in [(1, 0), (1, 1), (2, 0), (2, 1), (2, 2)].iter() {
            pixels[y * 4 + x] = WHITE;
        }
        Grid::from_pixels(&pixels, 4, 4).unwrap()
    }

    // Each seam node's (x, y) in the image.
    fn positions(grid: &Grid, seam: &Seam) -> Vec<(u32, u32)> {
        seam.nodes().map(|id| grid.locate(id).unwrap()).collect()
    }

    #[test]
    fn vertical_seam_avoids_the_white_block() {
        let grid = blocked();
        let seam = grid.find_vertical_seam().unwrap();
        assert_eq!(seam.orientation(), Orientation::Vertical);
        assert_eq!(positions(&grid, &seam), vec![(3, 0), (2, 1), (2, 2), (3, 3)]);

        let weights: Vec<f64> = seam.links().iter().map(|l| l.weight).collect();
        let expected = [3.27764790338235, 3.9969110574598634, 4.716174211537377, 7.993822114919727];
        assert!(weights.iter().zip(expected.iter()).all(|(a, b)| close(*a, *b)));
        assert!(close(seam.total_weight(), 7.993822114919727));
    }

    #[test]
    fn horizontal_seam_runs_along_the_block_edge() {
        let grid = blocked();
        let seam = grid.find_horizontal_seam().unwrap();
        assert_eq!(seam.orientation(), Orientation::Horizontal);
        assert_eq!(positions(&grid, &seam), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert!(close(seam.total_weight(), 8.608214090459123));
    }

    #[test]
    fn five_white_pixels() {
        let grid = five_white();
        let seam = grid.find_vertical_seam().unwrap();
        assert_eq!(positions(&grid, &seam), vec![(3, 0), (2, 1), (2, 2), (3, 3)]);
        let expected = [3.27764790338235, 4.242640687119285, 4.961903841196798, 8.561216005824793];
        assert!(seam
            .links()
            .iter()
            .zip(expected.iter())
            .all(|(l, w)| close(l.weight, *w)));

        let seam = grid.find_horizontal_seam().unwrap();
        assert_eq!(positions(&grid, &seam), vec![(0, 1), (1, 2), (2, 2), (3, 1)]);
        assert!(close(seam.total_weight(), 8.597723084088056));
    }

    #[test]
    fn seam_weights_accumulate_node_energies() {
        let grid = blocked();
        for orientation in [Orientation::Vertical, Orientation::Horizontal].iter() {
            let seam = grid.find_seam(*orientation).unwrap();
            assert_eq!(seam.len(), 4);
            let origin = seam.origin().unwrap();
            assert!(close(origin.weight, grid.energy_of(origin.node)));
            for (before, after) in seam.links().iter().tuple_windows() {
                assert!(after.weight >= before.weight);
                assert!(close(after.weight - before.weight, grid.energy_of(after.node)));
            }
        }
    }

    #[test]
    fn consecutive_seam_nodes_are_adjacent() {
        let grid = blocked();
        let seam = grid.find_vertical_seam().unwrap();
        for (above, below) in seam.nodes().tuple_windows() {
            let candidates = [
                grid.walk(above, &[Compass::South, Compass::West]),
                grid.neighbor(above, Compass::South),
                grid.walk(above, &[Compass::South, Compass::East]),
            ];
            assert!(candidates.contains(&below));
        }
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        // Uniform image: every interior pixel off the edge has the
        // same energy, so the leftmost cheapest path must win.
        let grid = Grid::from_pixels(&[BLUE; 25], 5, 5).unwrap();
        let seam = grid.find_vertical_seam().unwrap();
        let first = positions(&grid, &seam);
        assert_eq!(first, positions(&grid, &grid.find_vertical_seam().unwrap()));
        // Centre columns are cheaper than edge columns (the sentinels
        // are dark), and column 1 is the first of them.
        assert_eq!(first[0].0, 1);
    }

    #[test]
    fn refuses_to_search_a_tiny_lattice() {
        let grid = Grid::from_pixels(&[BLUE; 6], 2, 3).unwrap();
        assert_eq!(
            grid.find_vertical_seam(),
            Err(CarveError::GridTooSmall { width: 2, height: 3 })
        );
        assert!(grid.find_horizontal_seam().is_err());
    }

    #[test]
    fn searching_leaves_the_lattice_alone() {
        let grid = blocked();
        let before = grid.clone();
        grid.find_vertical_seam().unwrap();
        grid.find_horizontal_seam().unwrap();
        assert_eq!(grid, before);
    }
}
