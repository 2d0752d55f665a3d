use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sensor_coverage_core::{FloorPlan, RoomId};

use crate::batch::SensorBatch;
use crate::error::CoverageError;
use crate::sensor::SensorId;

/// Identifier of one sensor layout in a branching edit history.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct LayoutId(pub u64);

/// Provenance of a layout: its id plus the ids of up to two parents.
///
/// A plain immutable record, nothing more — resolving ids back to field
/// snapshots is the job of an external store keyed by [`LayoutId`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lineage {
    pub id: LayoutId,
    pub parents: [Option<LayoutId>; 2],
}

/// Fully-qualified sensor address: which room's batch, which sensor in it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SensorHandle {
    pub room: RoomId,
    pub sensor: SensorId,
}

/// All sensor batches of one floor plan, one per room, plus lineage
/// metadata so alternative layouts can be compared and reverted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorField {
    lineage: Lineage,
    batches: BTreeMap<RoomId, SensorBatch>,
    cost: i64,
}

impl SensorField {
    /// Build a root field (no parents) with one empty batch per room
    /// currently in the plan.
    pub fn new(id: LayoutId, plan: &FloorPlan) -> Self {
        let batches = plan
            .rooms()
            .iter()
            .map(|room| (room.id(), SensorBatch::new(room.id())))
            .collect();
        Self {
            lineage: Lineage {
                id,
                parents: [None, None],
            },
            batches,
            cost: 0,
        }
    }

    /// Fork this field into a child layout carrying all current sensors.
    pub fn derived_from(&self, id: LayoutId) -> Self {
        Self {
            lineage: Lineage {
                id,
                parents: [Some(self.lineage.id), None],
            },
            batches: self.batches.clone(),
            cost: 0,
        }
    }

    /// Combine two layouts into a child recording both parents.
    ///
    /// Rooms present in both take `base`'s batch; rooms only in `other`
    /// contribute theirs.
    pub fn merge_of(id: LayoutId, base: &SensorField, other: &SensorField) -> Self {
        let mut batches = base.batches.clone();
        for (room, batch) in &other.batches {
            batches.entry(*room).or_insert_with(|| batch.clone());
        }
        Self {
            lineage: Lineage {
                id,
                parents: [Some(base.lineage.id), Some(other.lineage.id)],
            },
            batches,
            cost: 0,
        }
    }

    pub fn id(&self) -> LayoutId {
        self.lineage.id
    }

    pub fn parents(&self) -> [Option<LayoutId>; 2] {
        self.lineage.parents
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage
    }

    /// Total cost from the most recent [`SensorField::calculate_cost`] call.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn batches(&self) -> impl Iterator<Item = &SensorBatch> {
        self.batches.values()
    }

    pub fn batch(&self, room: RoomId) -> Option<&SensorBatch> {
        self.batches.get(&room)
    }

    pub fn batch_mut(&mut self, room: RoomId) -> Option<&mut SensorBatch> {
        self.batches.get_mut(&room)
    }

    /// Register a batch for a room added to the plan after this field was
    /// built. A batch that already exists is left untouched.
    pub fn create_new_batch(&mut self, room: RoomId) -> &mut SensorBatch {
        self.batches.entry(room).or_insert_with(|| SensorBatch::new(room))
    }

    /// Drop the batch of a removed room. Unknown rooms are ignored, and the
    /// underlying room (if it still exists) is never touched.
    pub fn remove_batch(&mut self, room: RoomId) {
        self.batches.remove(&room);
    }

    /// Sweep every batch against its room, independently.
    ///
    /// Sensors never see across room boundaries, so each room is swept in
    /// isolation. A batch whose room has vanished from the plan is skipped;
    /// the editor is expected to call [`SensorField::remove_batch`]
    /// eventually.
    pub fn check_room_sensors_visibility(&mut self, plan: &mut FloorPlan) -> Result<(), CoverageError> {
        let grid = plan.grid();
        for batch in self.batches.values_mut() {
            match plan.room_mut(batch.room()) {
                Some(room) => batch.check_sensors_visibility(room, &grid)?,
                None => log::warn!("room {:?} missing from plan, skipping sweep", batch.room()),
            }
        }
        Ok(())
    }

    /// Sum every batch's cost into the field total, store and return it.
    ///
    /// Assumes [`SensorField::check_room_sensors_visibility`] just ran; the
    /// cost pass never re-sweeps by itself.
    pub fn calculate_cost(&mut self, plan: &FloorPlan) -> Result<i64, CoverageError> {
        self.cost = 0;
        for batch in self.batches.values_mut() {
            match plan.room(batch.room()) {
                Some(room) => self.cost += batch.calculate_cost(room)?,
                None => log::warn!("room {:?} missing from plan, skipping cost", batch.room()),
            }
        }
        Ok(self.cost)
    }

    /// Route each handle to its owning batch and remove the sensor there.
    /// Unknown rooms and absent sensors are silently ignored.
    pub fn delete_sensors(&mut self, handles: &[SensorHandle]) {
        for handle in handles {
            if let Some(batch) = self.batches.get_mut(&handle.room) {
                batch.remove_sensor_by_id(handle.sensor);
            }
        }
    }
}
