use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::geometry::{GridCoords, GridSpec};

/// Stable identifier of a room, unique within a floor plan.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

/// Non-owning handle to one wall of one room.
///
/// Sensors hold these instead of references so that an externally deleted
/// room can never leave the engine with a dangling owner.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct WallId {
    pub room: RoomId,
    pub index: usize,
}

/// The four cardinal wall orientations, indexed 0..3 in clockwise winding
/// order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WallOrientation {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl WallOrientation {
    pub fn from_index(index: usize) -> Option<WallOrientation> {
        match index {
            0 => Some(WallOrientation::North),
            1 => Some(WallOrientation::East),
            2 => Some(WallOrientation::South),
            3 => Some(WallOrientation::West),
            _ => None,
        }
    }

    /// Inward normal of a wall with this orientation.
    ///
    /// Fixed 4-entry table; `y` grows downward, so the north wall's normal
    /// points down into the room.
    #[inline]
    pub fn normal(self) -> Vector2<f32> {
        match self {
            WallOrientation::North => Vector2::new(0.0, 1.0),
            WallOrientation::East => Vector2::new(-1.0, 0.0),
            WallOrientation::South => Vector2::new(0.0, -1.0),
            WallOrientation::West => Vector2::new(1.0, 0.0),
        }
    }

    /// Unit vector along the wall, from its first corner.
    ///
    /// The first corner is the right corner when looking inward, so walking
    /// `along()` traverses the room boundary clockwise.
    #[inline]
    pub fn along(self) -> Vector2<f32> {
        match self {
            WallOrientation::North => Vector2::new(1.0, 0.0),
            WallOrientation::East => Vector2::new(0.0, 1.0),
            WallOrientation::South => Vector2::new(-1.0, 0.0),
            WallOrientation::West => Vector2::new(0.0, -1.0),
        }
    }
}

/// One straight wall segment of a room.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Wall {
    pub orientation: WallOrientation,
    /// Lattice position of the first corner (right corner looking inward).
    pub first_corner: GridCoords,
    /// Wall length in world units.
    pub length: f32,
}

/// A room: a closed ring of walls plus the cells tiling its surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    walls: Vec<Wall>,
    cells: Vec<Cell>,
}

impl Room {
    pub fn new(id: RoomId, walls: Vec<Wall>, cells: Vec<Cell>) -> Self {
        Self { id, walls, cells }
    }

    /// Build an axis-aligned rectangular room of `rows × cols` cells with
    /// its four-wall clockwise ring (north, east, south, west).
    pub fn rectangular(id: RoomId, origin: GridCoords, rows: u32, cols: u32, grid: &GridSpec) -> Self {
        let (rows_i, cols_i) = (rows as i32, cols as i32);
        let width = cols as f32 * grid.cell_size;
        let height = rows as f32 * grid.cell_size;

        let walls = vec![
            Wall {
                orientation: WallOrientation::North,
                first_corner: origin,
                length: width,
            },
            Wall {
                orientation: WallOrientation::East,
                first_corner: GridCoords {
                    i: origin.i,
                    j: origin.j + cols_i,
                },
                length: height,
            },
            Wall {
                orientation: WallOrientation::South,
                first_corner: GridCoords {
                    i: origin.i + rows_i,
                    j: origin.j + cols_i,
                },
                length: width,
            },
            Wall {
                orientation: WallOrientation::West,
                first_corner: GridCoords {
                    i: origin.i + rows_i,
                    j: origin.j,
                },
                length: height,
            },
        ];

        let mut cells = Vec::with_capacity((rows * cols) as usize);
        for r in 0..rows_i {
            for c in 0..cols_i {
                cells.push(Cell::new(
                    GridCoords {
                        i: origin.i + r,
                        j: origin.j + c,
                    },
                    grid,
                ));
            }
        }

        Self { id, walls, cells }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn wall(&self, index: usize) -> Option<&Wall> {
        self.walls.get(index)
    }

    /// Ring-previous wall index (counter-clockwise neighbor).
    #[inline]
    pub fn prev_wall_index(&self, index: usize) -> usize {
        (index + self.walls.len() - 1) % self.walls.len()
    }

    /// Ring-next wall index (clockwise neighbor).
    #[inline]
    pub fn next_wall_index(&self, index: usize) -> usize {
        (index + 1) % self.walls.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Zero every pixel's coverage counter ahead of a sweep.
    pub fn reset_pixel_counts(&mut self) {
        for cell in &mut self.cells {
            for pixel in cell.pixels_mut() {
                pixel.sensor_count = 0;
            }
        }
    }

    /// Total number of pixels across all cells.
    pub fn pixel_count(&self) -> usize {
        self.cells.iter().map(|c| c.pixels().len()).sum()
    }
}

/// Errors raised when assembling a floor plan from editor input.
#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    #[error("grid spec does not tile: cell_size={cell_size}, pixel_spacing={pixel_spacing}")]
    InvalidGridSpec { cell_size: f32, pixel_spacing: f32 },
    #[error("duplicate room id {0:?}")]
    DuplicateRoom(RoomId),
}

/// The floor plan arena: every room of one floor, keyed by [`RoomId`].
///
/// The engine layers batches of sensors on top of this; the plan itself is
/// owned and mutated by the external editor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FloorPlan {
    grid: GridSpec,
    rooms: Vec<Room>,
}

impl FloorPlan {
    pub fn new(grid: GridSpec) -> Result<Self, PlanError> {
        if grid.cell_size <= 0.0 || grid.pixel_spacing <= 0.0 || grid.pixels_per_side() == 0 {
            return Err(PlanError::InvalidGridSpec {
                cell_size: grid.cell_size,
                pixel_spacing: grid.pixel_spacing,
            });
        }
        Ok(Self {
            grid,
            rooms: Vec::new(),
        })
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id() == id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id() == id)
    }

    pub fn add_room(&mut self, room: Room) -> Result<(), PlanError> {
        if self.room(room.id()).is_some() {
            return Err(PlanError::DuplicateRoom(room.id()));
        }
        self.rooms.push(room);
        Ok(())
    }

    /// Remove a room from the plan. Removing an unknown id is a no-op.
    pub fn remove_room(&mut self, id: RoomId) {
        self.rooms.retain(|r| r.id() != id);
    }
}
