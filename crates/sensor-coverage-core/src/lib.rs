//! Floor-plan model and geometry for wall-mounted sensor coverage scoring.
//!
//! This crate holds the purely geometric side of the system: the cell/pixel
//! discretization of a floor plan, rooms with their wall rings, and the
//! small vector helpers the visibility engine is built on. It knows nothing
//! about sensors or costs — those live in the `sensor-coverage` crate.

mod cell;
mod geometry;
mod logger;
mod plan;

pub use cell::{Cell, Pixel};
pub use geometry::{distance_sq, rotate_cw, GridCoords, GridSpec};
pub use plan::{FloorPlan, PlanError, Room, RoomId, Wall, WallId, WallOrientation};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
