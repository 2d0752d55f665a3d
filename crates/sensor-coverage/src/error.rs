use sensor_coverage_core::RoomId;

/// Precondition failures of the coverage engine.
///
/// Routine UI-driven edge cases (removing an absent sensor or batch, wall
/// migration at a ring boundary, sweeping an empty room) are deliberately
/// *not* errors; only broken caller contracts surface here.
#[derive(thiserror::Error, Debug)]
pub enum CoverageError {
    #[error("wall index {index} out of range (room has {wall_count} walls)")]
    WallIndexOutOfRange { index: usize, wall_count: usize },
    #[error("room mismatch: batch is scoped to {expected:?}, got {got:?}")]
    RoomMismatch { expected: RoomId, got: RoomId },
}
