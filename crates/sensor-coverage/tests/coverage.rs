//! End-to-end scenarios over a real floor plan.

use sensor_coverage::core::{FloorPlan, GridCoords, GridSpec, Room, RoomId};
use sensor_coverage::{LayoutId, SensorField, SensorParams};

/// A plan with a single square room of one cell; with `pixel_spacing` at
/// half the cell size the room surface is exactly 4 pixels.
fn single_cell_plan() -> FloorPlan {
    let grid = GridSpec {
        cell_size: 20.0,
        pixel_spacing: 10.0,
    };
    let mut plan = FloorPlan::new(grid).expect("grid tiles");
    plan.add_room(Room::rectangular(RoomId(1), GridCoords { i: 0, j: 0 }, 1, 1, &grid))
        .expect("fresh room id");
    plan
}

/// Range beyond the room diagonal, 360° cone: sees everything in range.
fn omni_params(max_visible: u32) -> SensorParams {
    SensorParams {
        effect_radius: 1000.0,
        effect_arc: -1.0,
        max_visible_pixel_count: max_visible,
        ..SensorParams::default()
    }
}

#[test]
fn one_omni_sensor_covers_the_whole_room() {
    let mut plan = single_cell_plan();
    let mut field = SensorField::new(LayoutId(1), &plan);

    let room = plan.room(RoomId(1)).unwrap().clone();
    let sensor = field
        .batch_mut(RoomId(1))
        .unwrap()
        .create_sensor_at_wall_index(0, 10.0, 0.0, &room, omni_params(10))
        .expect("wall 0 exists");

    field.check_room_sensors_visibility(&mut plan).unwrap();
    let cost = field.calculate_cost(&plan).unwrap();

    let room = plan.room(RoomId(1)).unwrap();
    let counts: Vec<u32> = room
        .cells()
        .iter()
        .flat_map(|c| c.pixels())
        .map(|p| p.sensor_count)
        .collect();
    assert_eq!(counts, vec![1, 1, 1, 1], "every pixel singly covered");

    let batch = field.batch(RoomId(1)).unwrap();
    assert_eq!(batch.sensor(sensor).unwrap().visible_pixel_count(), 4);

    // No blind pixels, no overlap; only the under-use shortfall remains.
    assert_eq!(cost, 2 * (10 - 4));
}

#[test]
fn field_sweep_is_idempotent_across_rooms() {
    let grid = GridSpec::default();
    let mut plan = FloorPlan::new(grid).unwrap();
    plan.add_room(Room::rectangular(RoomId(1), GridCoords { i: 0, j: 0 }, 3, 3, &grid))
        .unwrap();
    plan.add_room(Room::rectangular(RoomId(2), GridCoords { i: 0, j: 4 }, 2, 4, &grid))
        .unwrap();

    let mut field = SensorField::new(LayoutId(1), &plan);
    for (room_id, wall, pos) in [(RoomId(1), 0, 25.0), (RoomId(1), 2, 40.0), (RoomId(2), 1, 10.0)] {
        let room = plan.room(room_id).unwrap().clone();
        field
            .batch_mut(room_id)
            .unwrap()
            .create_sensor_at_wall_index(wall, pos, 0.3, &room, SensorParams::default())
            .unwrap();
    }

    field.check_room_sensors_visibility(&mut plan).unwrap();
    let first = field.calculate_cost(&plan).unwrap();

    field.check_room_sensors_visibility(&mut plan).unwrap();
    let second = field.calculate_cost(&plan).unwrap();

    assert_eq!(first, second, "unchanged state must re-sweep identically");
}

#[test]
fn deleting_a_sensor_is_reflected_after_the_next_sweep() {
    let mut plan = single_cell_plan();
    let mut field = SensorField::new(LayoutId(1), &plan);

    let room = plan.room(RoomId(1)).unwrap().clone();
    let batch = field.batch_mut(RoomId(1)).unwrap();
    let first = batch
        .create_sensor_at_wall_index(0, 10.0, 0.0, &room, omni_params(4))
        .unwrap();
    batch
        .create_sensor_at_wall_index(2, 10.0, 0.0, &room, omni_params(4))
        .unwrap();

    field.check_room_sensors_visibility(&mut plan).unwrap();
    let crowded = field.calculate_cost(&plan).unwrap();
    // 4 pixels double-covered: 4 × 1 overlap penalty.
    assert_eq!(crowded, 4);

    field.delete_sensors(&[sensor_coverage::SensorHandle {
        room: RoomId(1),
        sensor: first,
    }]);
    field.check_room_sensors_visibility(&mut plan).unwrap();
    let relaxed = field.calculate_cost(&plan).unwrap();
    assert_eq!(relaxed, 0, "no residual counts from the removed sensor");
}

#[test]
fn lineage_survives_derivation_chains() {
    let plan = single_cell_plan();
    let root = SensorField::new(LayoutId(10), &plan);
    let alt_a = root.derived_from(LayoutId(11));
    let alt_b = root.derived_from(LayoutId(12));
    let merged = SensorField::merge_of(LayoutId(13), &alt_a, &alt_b);

    assert_eq!(root.parents(), [None, None]);
    assert_eq!(alt_a.parents(), [Some(LayoutId(10)), None]);
    assert_eq!(merged.parents(), [Some(LayoutId(11)), Some(LayoutId(12))]);
    assert_eq!(merged.id(), LayoutId(13));
}
