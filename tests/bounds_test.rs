use cgmath::{Deg, Matrix4, Vector3};
use stillroom::data_structures::bounds::{Aabb, OUTLINE_INDICES};

const EPS: f32 = 1e-4;

#[test]
fn from_points_of_nothing_is_none() {
    assert_eq!(Aabb::from_points(std::iter::empty()), None);
}

#[test]
fn from_points_tracks_componentwise_extremes() {
    let aabb = Aabb::from_points([
        [1.0, -2.0, 0.5],
        [-3.0, 4.0, 0.0],
        [0.0, 0.0, 7.0],
    ])
    .unwrap();
    assert_eq!(aabb.min, [-3.0, -2.0, 0.0]);
    assert_eq!(aabb.max, [1.0, 4.0, 7.0]);
}

#[test]
fn union_encloses_both() {
    let a = Aabb {
        min: [0.0; 3],
        max: [1.0; 3],
    };
    let b = Aabb {
        min: [-2.0, 0.5, 0.0],
        max: [0.5, 3.0, 0.5],
    };
    let u = a.union(&b);
    assert_eq!(u.min, [-2.0, 0.0, 0.0]);
    assert_eq!(u.max, [1.0, 3.0, 1.0]);
}

#[test]
fn translation_shifts_the_box() {
    let aabb = Aabb {
        min: [0.0; 3],
        max: [1.0, 2.0, 3.0],
    };
    let shifted = aabb.transformed(&Matrix4::from_translation(Vector3::new(10.0, 0.0, -1.0)));
    assert_eq!(shifted.min, [10.0, 0.0, -1.0]);
    assert_eq!(shifted.max, [11.0, 2.0, 2.0]);
}

#[test]
fn rotation_realigns_the_box() {
    let aabb = Aabb {
        min: [0.0; 3],
        max: [1.0, 2.0, 3.0],
    };
    // A quarter turn about Z carries +X to +Y and +Y to -X.
    let rotated = aabb.transformed(&Matrix4::from_angle_z(Deg(90.0)));
    for (got, want) in rotated.min.iter().zip([-2.0, 0.0, 0.0]) {
        assert!((got - want).abs() < EPS);
    }
    for (got, want) in rotated.max.iter().zip([0.0, 1.0, 3.0]) {
        assert!((got - want).abs() < EPS);
    }
}

#[test]
fn outline_indices_trace_the_twelve_edges() {
    assert_eq!(OUTLINE_INDICES.len(), 24);
    assert!(OUTLINE_INDICES.iter().all(|&i| i < 8));

    let corners = Aabb {
        min: [0.0; 3],
        max: [1.0; 3],
    }
    .corners();
    // Every line connects two corners differing along exactly one axis.
    for pair in OUTLINE_INDICES.chunks(2) {
        let (a, b) = (corners[pair[0] as usize], corners[pair[1] as usize]);
        let differing = (0..3).filter(|&axis| a[axis] != b[axis]).count();
        assert_eq!(differing, 1, "{a:?} -> {b:?} is not a box edge");
    }
}
