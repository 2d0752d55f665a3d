use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Integer lattice coordinates on the cell grid (row `i`, column `j`).
///
/// The world mapping follows canvas conventions: `x` grows with the column
/// and `y` grows *downward* with the row.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridCoords {
    pub i: i32,
    pub j: i32,
}

impl GridCoords {
    /// World position of this lattice point.
    #[inline]
    pub fn world(self, grid: &GridSpec) -> Point2<f32> {
        Point2::new(self.j as f32 * grid.cell_size, self.i as f32 * grid.cell_size)
    }
}

/// Discretization constants for a floor plan.
///
/// Both values are calibration constants inherited from the layout editor:
/// a cell is the tiling unit of a room, and pixels are sampled every
/// `pixel_spacing` world units inside a cell. `cell_size` must be an exact
/// multiple of `pixel_spacing` for the pixel lattice to tile the cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// World units per cell edge.
    pub cell_size: f32,
    /// World units between adjacent pixel samples.
    pub pixel_spacing: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            pixel_spacing: 5.0,
        }
    }
}

impl GridSpec {
    /// Number of pixel samples along one cell edge.
    #[inline]
    pub fn pixels_per_side(&self) -> usize {
        (self.cell_size / self.pixel_spacing).floor() as usize
    }
}

/// Squared Euclidean distance between two world points.
///
/// The visibility hot path compares against a squared radius, so the square
/// root is never taken there.
#[inline]
pub fn distance_sq(a: Point2<f32>, b: Point2<f32>) -> f32 {
    (b - a).norm_squared()
}

/// Rotate `v` by `angle` radians using the editor's sign convention:
/// `(cos·x + sin·y, −sin·x + cos·y)`.
///
/// With `y` growing downward this turns counter-clockwise on screen. The
/// exact sign layout is load-bearing for behavioral parity with the stored
/// layouts, so it is centralized here.
#[inline]
pub fn rotate_cw(v: Vector2<f32>, angle: f32) -> Vector2<f32> {
    let (s, c) = angle.sin_cos();
    Vector2::new(c * v.x + s * v.y, -s * v.x + c * v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn world_mapping_uses_column_for_x() {
        let grid = GridSpec::default();
        let p = GridCoords { i: 2, j: 3 }.world(&grid);
        assert_relative_eq!(p.x, 60.0);
        assert_relative_eq!(p.y, 40.0);
    }

    #[test]
    fn default_grid_tiles_sixteen_pixels_per_cell() {
        let grid = GridSpec::default();
        assert_eq!(grid.pixels_per_side(), 4);
    }

    #[test]
    fn rotation_is_identity_at_zero_angle() {
        let v = Vector2::new(0.3_f32, -0.7);
        let r = rotate_cw(v, 0.0);
        assert_relative_eq!(r.x, v.x);
        assert_relative_eq!(r.y, v.y);
    }

    #[test]
    fn rotation_sign_convention_matches_editor() {
        // Rotating the downward normal (0, 1) by +90° must yield (1, 0).
        let r = rotate_cw(Vector2::new(0.0_f32, 1.0), std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(r.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn squared_distance_avoids_sqrt() {
        let a = Point2::new(1.0_f32, 2.0);
        let b = Point2::new(4.0_f32, 6.0);
        assert_relative_eq!(distance_sq(a, b), 25.0);
    }
}
