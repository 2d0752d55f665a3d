//! Visibility sweep and coverage-cost engine for wall-mounted sensor
//! layouts.
//!
//! A floor plan (from [`sensor_coverage_core`], re-exported here as
//! [`core`]) discretizes each room into cells of pixels. Sensors are
//! mounted on walls with a position, a facing angle, a range and an angular
//! field of view. The engine answers one question: which pixels does each
//! sensor see, and how good is the layout overall?
//!
//! The scalar objective rewards full single coverage and penalizes blind
//! pixels (heavily), redundant multi-coverage (mildly) and sensors that
//! under-use their range. A future placement optimizer would minimize it;
//! this crate deliberately ships only the cost function, not a solver.
//!
//! ```
//! use sensor_coverage::core::{FloorPlan, GridCoords, GridSpec, Room, RoomId};
//! use sensor_coverage::{LayoutId, SensorField, SensorParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = GridSpec::default();
//! let mut plan = FloorPlan::new(grid)?;
//! plan.add_room(Room::rectangular(RoomId(1), GridCoords { i: 0, j: 0 }, 4, 4, &grid))?;
//!
//! let mut field = SensorField::new(LayoutId(1), &plan);
//! let room = plan.room(RoomId(1)).unwrap().clone();
//! field
//!     .batch_mut(RoomId(1))
//!     .unwrap()
//!     .create_sensor_at_wall_index(0, 40.0, 0.0, &room, SensorParams::default())?;
//!
//! field.check_room_sensors_visibility(&mut plan)?;
//! let cost = field.calculate_cost(&plan)?;
//! println!("layout cost: {cost}");
//! # Ok(())
//! # }
//! ```
//!
//! Everything is single-threaded and recomputed from scratch on every
//! sweep; rooms are independent, so a caller that wants parallelism can fan
//! batches out across workers without any shared state.

pub use sensor_coverage_core as core;

mod batch;
mod config;
mod error;
mod field;
mod sensor;
mod visibility;

pub use batch::SensorBatch;
pub use config::{ideal_visible_pixel_count, SensorParams};
pub use error::CoverageError;
pub use field::{LayoutId, Lineage, SensorField, SensorHandle};
pub use sensor::{Sensor, SensorId};
pub use visibility::pixel_in_view;
