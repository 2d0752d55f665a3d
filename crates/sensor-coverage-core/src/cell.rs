use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::geometry::{GridCoords, GridSpec};

/// One sample point of the discretized room surface.
///
/// `sensor_count` is derived state: it is reset to zero at the start of
/// every visibility sweep and never updated incrementally across sweeps.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pixel {
    /// World position, fixed at construction.
    pub world: Point2<f32>,
    /// How many sensors currently see this pixel.
    pub sensor_count: u32,
}

/// A fixed-size tile of pixels; the tiling unit of a room.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    /// Lattice coordinates of the cell's top-left corner.
    pub origin: GridCoords,
    pixels: Vec<Pixel>,
}

impl Cell {
    /// Build a cell at `origin` with its pixel lattice filled in.
    ///
    /// Pixels sit at the centers of a `pixels_per_side × pixels_per_side`
    /// subdivision of the cell, so their world positions never change after
    /// construction.
    pub fn new(origin: GridCoords, grid: &GridSpec) -> Self {
        let base = origin.world(grid);
        let n = grid.pixels_per_side();
        let mut pixels = Vec::with_capacity(n * n);
        for ip in 0..n {
            for jp in 0..n {
                pixels.push(Pixel {
                    world: Point2::new(
                        base.x + (jp as f32 + 0.5) * grid.pixel_spacing,
                        base.y + (ip as f32 + 0.5) * grid.pixel_spacing,
                    ),
                    sensor_count: 0,
                });
            }
        }
        Self { origin, pixels }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }
}
