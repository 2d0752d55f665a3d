use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use sensor_coverage_core::{rotate_cw, GridSpec, Room, WallId};

use crate::config::SensorParams;

/// Identifier of a sensor within its batch, assigned at creation and stable
/// until the sensor is removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SensorId(pub u32);

/// A directional sensor mounted on one wall.
///
/// The sensor stores its wall as a [`WallId`] handle plus an offset along
/// that wall; exactly one wall owns it at any time. The visibility predicate
/// does not live here — the sensor only exposes the geometric quantities
/// the test consumes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sensor {
    id: SensorId,
    wall: WallId,
    /// Offset along the wall from its first corner, world units.
    position: f32,
    /// Facing angle relative to the wall's inward normal, radians.
    alpha: f32,
    params: SensorParams,
    /// Derived per-sweep state; reset before every sweep, never persisted.
    visible_pixel_count: u32,
}

impl Sensor {
    pub(crate) fn new(id: SensorId, wall: WallId, position: f32, alpha: f32, params: SensorParams, room: &Room) -> Self {
        let length = room.wall(wall.index).map_or(0.0, |w| w.length);
        Self {
            id,
            wall,
            position: position.clamp(0.0, length),
            alpha: alpha.clamp(-params.alpha_max, params.alpha_max),
            params,
            visible_pixel_count: 0,
        }
    }

    pub fn id(&self) -> SensorId {
        self.id
    }

    pub fn wall(&self) -> WallId {
        self.wall
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn params(&self) -> &SensorParams {
        &self.params
    }

    pub fn visible_pixel_count(&self) -> u32 {
        self.visible_pixel_count
    }

    pub(crate) fn reset_visible(&mut self) {
        self.visible_pixel_count = 0;
    }

    pub(crate) fn set_visible(&mut self, count: u32) {
        self.visible_pixel_count = count;
    }

    /// Slide the sensor `delta` world units along its wall.
    ///
    /// Dropping below offset 1 wraps the sensor onto the ring-previous wall
    /// at `prev.length - 2 + overshoot`; exceeding `length - 2` wraps onto
    /// the ring-next wall symmetrically. Total displacement is preserved
    /// rather than clamped, so the wall assignment is a function of drag
    /// history.
    ///
    /// `alpha` is deliberately *not* reinterpreted when the wall (and with
    /// it the inward normal) changes: this reproduces the editor's behavior
    /// bit for bit, quirk included.
    pub fn translate(&mut self, delta: f32, room: &Room) {
        self.position += delta;
        if self.position < 1.0 {
            let prev = room.prev_wall_index(self.wall.index);
            let Some(prev_length) = room.wall(prev).map(|w| w.length) else {
                return;
            };
            self.wall.index = prev;
            self.position += prev_length - 2.0;
        } else {
            let Some(length) = room.wall(self.wall.index).map(|w| w.length) else {
                return;
            };
            if self.position > length - 2.0 {
                self.position -= length - 2.0;
                self.wall.index = room.next_wall_index(self.wall.index);
            }
        }
    }

    /// Turn the sensor by `delta` radians, saturating at `±alpha_max`.
    pub fn rotate(&mut self, delta: f32) {
        self.alpha = (self.alpha + delta).clamp(-self.params.alpha_max, self.params.alpha_max);
    }

    /// Facing direction: the wall's inward normal rotated by `alpha`.
    pub fn look_direction(&self, room: &Room) -> Vector2<f32> {
        let normal = room
            .wall(self.wall.index)
            .map_or_else(Vector2::zeros, |w| w.orientation.normal());
        rotate_cw(normal, self.alpha)
    }

    /// Absolute 2D position of the sensor head.
    ///
    /// The wall's first corner is the origin; the sensor sits `position`
    /// units along the wall and one pixel step in front of it (along the
    /// inward normal), so it never coincides with the wall surface itself.
    pub fn world_position(&self, room: &Room, grid: &GridSpec) -> Point2<f32> {
        let Some(wall) = room.wall(self.wall.index) else {
            return Point2::origin();
        };
        let corner = wall.first_corner.world(grid);
        corner + wall.orientation.along() * self.position + wall.orientation.normal() * grid.pixel_spacing
    }
}
