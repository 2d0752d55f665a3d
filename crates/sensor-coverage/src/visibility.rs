//! The per-pixel visibility predicate.
//!
//! A pure range+cone test in open 2D space: no occlusion by walls or other
//! obstacles is modeled. That is a documented simplification of the system,
//! not an oversight.

use nalgebra::{Point2, Vector2};

use sensor_coverage_core::distance_sq;

/// Whether a sensor at `sensor` facing `look_dir` sees the pixel at `pixel`.
///
/// `look_dir` must be unit length; `arc` is the cosine of the cone
/// half-angle. Both boundaries are inclusive: a pixel exactly at `radius`
/// distance or exactly on the cone edge counts as visible. A pixel
/// coincident with the sensor has no direction to test and is visible.
#[inline]
pub fn pixel_in_view(
    sensor: Point2<f32>,
    look_dir: Vector2<f32>,
    pixel: Point2<f32>,
    radius: f32,
    arc: f32,
) -> bool {
    let dist_sq = distance_sq(sensor, pixel);
    if dist_sq > radius * radius {
        return false;
    }
    if dist_sq == 0.0 {
        return true;
    }
    let d = pixel - sensor;
    d.dot(&look_dir) / dist_sq.sqrt() >= arc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down() -> Vector2<f32> {
        Vector2::new(0.0, 1.0)
    }

    #[test]
    fn rejects_beyond_range() {
        let sensor = Point2::new(0.0, 0.0);
        assert!(!pixel_in_view(sensor, down(), Point2::new(0.0, 10.1), 10.0, 0.5));
    }

    #[test]
    fn range_boundary_is_inclusive() {
        let sensor = Point2::new(0.0, 0.0);
        assert!(pixel_in_view(sensor, down(), Point2::new(0.0, 10.0), 10.0, 0.5));
    }

    #[test]
    fn rejects_outside_cone() {
        let sensor = Point2::new(0.0, 0.0);
        // Straight to the side of a downward-facing 120° cone.
        assert!(!pixel_in_view(sensor, down(), Point2::new(5.0, 0.0), 10.0, 0.5));
    }

    #[test]
    fn cone_edge_is_inclusive() {
        let sensor = Point2::new(0.0, 0.0);
        // 60° off the look direction: dot == 0.5 exactly (up to rounding).
        let pixel = Point2::new(3.0_f32.sqrt(), 1.0);
        assert!(pixel_in_view(sensor, down(), pixel, 10.0, 0.4999));
    }

    #[test]
    fn coincident_pixel_is_visible() {
        let p = Point2::new(4.0, 4.0);
        assert!(pixel_in_view(p, down(), p, 10.0, 0.5));
    }

    #[test]
    fn negative_arc_sees_everything_in_range() {
        let sensor = Point2::new(0.0, 0.0);
        // Directly behind the look direction still passes with arc = -1.
        assert!(pixel_in_view(sensor, down(), Point2::new(0.0, -5.0), 10.0, -1.0));
    }
}
