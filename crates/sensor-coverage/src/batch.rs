use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use sensor_coverage_core::{GridSpec, Room, RoomId, WallId};

use crate::config::SensorParams;
use crate::error::CoverageError;
use crate::sensor::{Sensor, SensorId};
use crate::visibility::pixel_in_view;

/// Penalty per pixel no sensor sees.
const BLIND_PIXEL_PENALTY: i64 = 3;
/// Penalty per redundant sensor on a multiply-covered pixel.
const OVERLAP_PENALTY: i64 = 1;
/// Penalty per pixel of shortfall against a sensor's calibration ceiling.
const UNDERUSE_PENALTY: i64 = 2;

/// Precomputed per-sensor geometry for one sweep, so the pixel loop does not
/// re-derive positions while the room's pixels are borrowed mutably.
struct SensorGeometry {
    position: Point2<f32>,
    look_dir: Vector2<f32>,
    radius: f32,
    arc: f32,
}

/// All sensors assigned to one room, plus the room's last computed cost.
///
/// A batch's identity equals its room's identity: it never owns pixels
/// (those belong to the room's cells) but mutates their coverage counters
/// during a sweep.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorBatch {
    room: RoomId,
    sensors: Vec<Sensor>,
    next_sensor_id: u32,
    cost: i64,
}

impl SensorBatch {
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            sensors: Vec::new(),
            next_sensor_id: 0,
            cost: 0,
        }
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn sensor(&self, id: SensorId) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id() == id)
    }

    pub fn sensor_mut(&mut self, id: SensorId) -> Option<&mut Sensor> {
        self.sensors.iter_mut().find(|s| s.id() == id)
    }

    /// Cost from the most recent [`SensorBatch::calculate_cost`] call.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    fn ensure_room(&self, room: &Room) -> Result<(), CoverageError> {
        if room.id() != self.room {
            return Err(CoverageError::RoomMismatch {
                expected: self.room,
                got: room.id(),
            });
        }
        Ok(())
    }

    /// Mount a new sensor on the wall identified by `wall`.
    ///
    /// The wall must belong to this batch's room and exist in its ring;
    /// anything else is a broken caller contract, not a UI edge case.
    pub fn create_sensor_on_wall(
        &mut self,
        wall: WallId,
        position: f32,
        alpha: f32,
        room: &Room,
        params: SensorParams,
    ) -> Result<SensorId, CoverageError> {
        self.ensure_room(room)?;
        if wall.room != self.room {
            return Err(CoverageError::RoomMismatch {
                expected: self.room,
                got: wall.room,
            });
        }
        if wall.index >= room.walls().len() {
            return Err(CoverageError::WallIndexOutOfRange {
                index: wall.index,
                wall_count: room.walls().len(),
            });
        }
        let id = SensorId(self.next_sensor_id);
        self.next_sensor_id += 1;
        self.sensors.push(Sensor::new(id, wall, position, alpha, params, room));
        Ok(id)
    }

    /// By-index companion of [`SensorBatch::create_sensor_on_wall`].
    pub fn create_sensor_at_wall_index(
        &mut self,
        wall_index: usize,
        position: f32,
        alpha: f32,
        room: &Room,
        params: SensorParams,
    ) -> Result<SensorId, CoverageError> {
        let wall = WallId {
            room: self.room,
            index: wall_index,
        };
        self.create_sensor_on_wall(wall, position, alpha, room, params)
    }

    /// Remove the sensor with the given id; absent ids are ignored.
    pub fn remove_sensor_by_id(&mut self, id: SensorId) {
        self.sensors.retain(|s| s.id() != id);
    }

    /// Remove the sensor at a positional index; out-of-range is ignored.
    pub fn remove_sensor_at_index(&mut self, index: usize) {
        if index < self.sensors.len() {
            self.sensors.remove(index);
        }
    }

    pub fn delete_all(&mut self) {
        self.sensors.clear();
    }

    /// Run the full visibility sweep over this batch's room.
    ///
    /// Every pixel and sensor counter is zeroed first, then every pixel is
    /// tested against every sensor — a full O(pixels × sensors) recompute
    /// each call, with no incremental path. Repeating the sweep without
    /// intervening mutation yields identical counters.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "info",
            skip(self, room, grid),
            fields(room = self.room.0, sensors = self.sensors.len())
        )
    )]
    pub fn check_sensors_visibility(&mut self, room: &mut Room, grid: &GridSpec) -> Result<(), CoverageError> {
        self.ensure_room(room)?;

        room.reset_pixel_counts();
        for sensor in &mut self.sensors {
            sensor.reset_visible();
        }

        let geometry: Vec<SensorGeometry> = self
            .sensors
            .iter()
            .map(|s| SensorGeometry {
                position: s.world_position(room, grid),
                look_dir: s.look_direction(room),
                radius: s.params().effect_radius,
                arc: s.params().effect_arc,
            })
            .collect();

        let mut hits = vec![0u32; geometry.len()];
        for cell in room.cells_mut() {
            for pixel in cell.pixels_mut() {
                for (k, g) in geometry.iter().enumerate() {
                    if pixel_in_view(g.position, g.look_dir, pixel.world, g.radius, g.arc) {
                        pixel.sensor_count += 1;
                        hits[k] += 1;
                    }
                }
            }
        }
        for (sensor, seen) in self.sensors.iter_mut().zip(hits) {
            sensor.set_visible(seen);
        }

        log::debug!(
            "swept room {:?}: {} sensors over {} pixels",
            self.room,
            self.sensors.len(),
            room.pixel_count()
        );
        Ok(())
    }

    /// Aggregate the room's coverage cost from the counters of the last
    /// sweep; does not re-run the sweep itself.
    ///
    /// Blind pixels cost 3 each, every redundant sensor on a pixel costs 1,
    /// and each sensor pays 2 per pixel of shortfall against its
    /// `max_visible_pixel_count` ceiling. An empty sensor list contributes
    /// nothing to the shortfall term, an empty room nothing to the coverage
    /// terms. The shortfall term is signed: a sensor outperforming its
    /// ceiling earns the difference back.
    pub fn calculate_cost(&mut self, room: &Room) -> Result<i64, CoverageError> {
        self.ensure_room(room)?;

        let mut cost = 0i64;
        for cell in room.cells() {
            for pixel in cell.pixels() {
                cost += match pixel.sensor_count {
                    0 => BLIND_PIXEL_PENALTY,
                    1 => 0,
                    n => OVERLAP_PENALTY * (n as i64 - 1),
                };
            }
        }
        for sensor in &self.sensors {
            cost += UNDERUSE_PENALTY
                * (sensor.params().max_visible_pixel_count as i64 - sensor.visible_pixel_count() as i64);
        }

        self.cost = cost;
        Ok(cost)
    }
}
