use cgmath::{Deg, InnerSpace, Quaternion, Rotation, Rotation3, Vector3};
use stillroom::data_structures::instance::Instance;
use stillroom::scene::{Placement, deg_to_rad};

const EPS: f32 = 1e-5;

#[test]
fn deg_to_rad_is_linear() {
    for d in [-720.0f32, -90.0, -45.98, 0.5, 32.6, 93.8, 360.0] {
        let expected = d * std::f32::consts::PI / 180.0;
        assert!((deg_to_rad(d) - expected).abs() < EPS, "failed for {d}");
    }
}

#[test]
fn deg_to_rad_zero_is_exactly_zero() {
    assert_eq!(deg_to_rad(0.0), 0.0);
}

#[test]
fn deg_to_rad_half_turn_is_pi() {
    assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < EPS);
    assert!((deg_to_rad(-180.0) + std::f32::consts::PI).abs() < EPS);
}

#[test]
fn default_placement_is_identity() {
    let instance = Placement::default().to_instance();
    assert_eq!(instance, Instance::new());
}

#[test]
fn placement_converts_degrees_to_quaternion() {
    let placement = Placement::scaled([1.0, 2.0, 3.0], [0.0, 90.0, 0.0], 2.0);
    let instance = placement.to_instance();

    assert_eq!(instance.position, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(instance.scale, Vector3::new(2.0, 2.0, 2.0));

    // A quarter turn about Y carries +X to -Z.
    let rotated = instance.rotation.rotate_vector(Vector3::unit_x());
    assert!((rotated - Vector3::new(0.0, 0.0, -1.0)).magnitude() < EPS);

    let expected: Quaternion<f32> = Quaternion::from_angle_y(Deg(90.0));
    assert!((instance.rotation.dot(expected).abs() - 1.0).abs() < EPS);
}

#[test]
fn placement_keeps_per_axis_values() {
    let placement = Placement::new([1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [4.0, 5.0, 6.0]);
    let instance = placement.to_instance();
    assert_eq!(instance.scale, Vector3::new(4.0, 5.0, 6.0));
}

#[test]
fn instance_composition_applies_parent_scale_and_offset() {
    let parent = Instance {
        position: Vector3::new(1.0, 0.0, 0.0),
        scale: Vector3::new(2.0, 2.0, 2.0),
        ..Instance::new()
    };
    let child = Instance {
        position: Vector3::new(1.0, 1.0, 0.0),
        ..Instance::new()
    };

    let world = &parent * &child;
    assert_eq!(world.position, Vector3::new(3.0, 2.0, 0.0));
    assert_eq!(world.scale, Vector3::new(2.0, 2.0, 2.0));
}

#[test]
fn instance_composition_rotates_child_offset() {
    let parent = Instance {
        rotation: Quaternion::from_angle_y(Deg(90.0)),
        ..Instance::new()
    };
    let child = Instance {
        position: Vector3::new(1.0, 0.0, 0.0),
        ..Instance::new()
    };

    let world = &parent * &child;
    assert!((world.position - Vector3::new(0.0, 0.0, -1.0)).magnitude() < EPS);
}
