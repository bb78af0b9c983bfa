use std::collections::HashMap;

use stillroom::camera::Camera;
use stillroom::reading_room;
use stillroom::scene::{ShadowFlags, deg_to_rad};

const EPS: f32 = 1e-6;

#[test]
fn the_room_has_two_planes_and_nine_models() {
    let room = reading_room::descriptor();
    assert_eq!(room.planes.len(), 2);
    assert_eq!(room.models.len(), 9);
    assert!(room.composites.is_empty());
}

#[test]
fn fully_loaded_population_matches_the_authored_table() {
    let room = reading_room::descriptor();
    // One object per plane, two per model (model + outline).
    assert_eq!(room.expected_object_count(), 20);
    // With the two lights (carried as uniforms, not graph objects) the
    // setup accounts for 22 artifacts in total.
    let lights = 2;
    assert_eq!(room.expected_object_count() + lights, 22);
}

#[test]
fn every_model_casts_and_receives_while_planes_do_neither() {
    let room = reading_room::descriptor();
    for model in &room.models {
        assert_eq!(model.shadows, ShadowFlags::CAST_AND_RECEIVE, "{}", model.asset);
    }
    for plane in &room.planes {
        assert_eq!(plane.shadows, ShadowFlags::NONE, "{}", plane.texture);
    }
}

#[test]
fn the_console_tables_books_and_stacks_come_in_pairs() {
    let room = reading_room::descriptor();
    let mut by_asset: HashMap<&str, usize> = HashMap::new();
    for model in &room.models {
        *by_asset.entry(model.asset).or_default() += 1;
    }

    assert_eq!(by_asset["console_table.glb"], 2);
    assert_eq!(by_asset["book_stack.glb"], 2);
    assert_eq!(by_asset["old_book.glb"], 2);
    assert_eq!(by_asset["rattan_coffee_table.glb"], 1);
    assert_eq!(by_asset["rug.glb"], 1);
    assert_eq!(by_asset["standing_fan.glb"], 1);
}

#[test]
fn the_two_console_tables_mirror_across_the_wall_axis() {
    let room = reading_room::descriptor();
    let tables: Vec<_> = room
        .models
        .iter()
        .filter(|m| m.asset == "console_table.glb")
        .collect();
    assert_eq!(tables.len(), 2);
    // Same wall (z), same height, opposite sides of the room centre.
    assert_eq!(tables[0].placement.position[2], tables[1].placement.position[2]);
    assert_eq!(tables[0].placement.position[1], tables[1].placement.position[1]);
    assert!(tables[0].placement.position[0] < 0.0);
    assert!(tables[1].placement.position[0] > 0.0);
}

#[test]
fn camera_pose_equals_the_literals_converted_to_radians() {
    let room = reading_room::descriptor();
    let camera = Camera::from_pose(&room.camera);

    assert_eq!(camera.position.x, -1.767);
    assert_eq!(camera.position.y, 14.678);
    assert_eq!(camera.position.z, 10.923);

    assert!((camera.rotation.x.0 - deg_to_rad(-45.98)).abs() < EPS);
    assert!((camera.rotation.y.0 - deg_to_rad(-2.11)).abs() < EPS);
    assert!((camera.rotation.z.0 - deg_to_rad(-2.18)).abs() < EPS);
}

#[test]
fn the_lights_match_the_authored_palette() {
    let room = reading_room::descriptor();

    assert_eq!(room.ambient.intensity, 0.4);
    assert_eq!(room.ambient.color[2], 0.0);

    assert_eq!(room.directional.intensity, 4.0);
    assert!(room.directional.cast_shadow);
    assert_eq!(room.directional.position, [20.338, 13.493, 6.517]);
}
