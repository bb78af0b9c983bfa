//! Axis-aligned bounding boxes.
//!
//! Each successfully loaded model gets a world-space box that the debug
//! outline pass draws as a red wireframe around it.

use cgmath::{Matrix4, Point3, Transform};

/// An axis-aligned box. `min` and `max` hold the componentwise extremes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Line-list indices over [`Aabb::corners`]: the twelve box edges.
pub const OUTLINE_INDICES: [u16; 24] = [
    0, 1, 1, 3, 3, 2, 2, 0, // bottom face
    4, 5, 5, 7, 7, 6, 6, 4, // top face
    0, 4, 1, 5, 2, 6, 3, 7, // verticals
];

impl Aabb {
    /// Smallest box enclosing all given points. `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f32; 3]>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in points {
            aabb.grow(p);
        }
        Some(aabb)
    }

    fn grow(&mut self, p: [f32; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.grow(other.min);
        out.grow(other.max);
        out
    }

    /// The eight corners, minimum corner first, x varying fastest.
    pub fn corners(&self) -> [[f32; 3]; 8] {
        let [x0, y0, z0] = self.min;
        let [x1, y1, z1] = self.max;
        [
            [x0, y0, z0],
            [x1, y0, z0],
            [x0, y1, z0],
            [x1, y1, z0],
            [x0, y0, z1],
            [x1, y0, z1],
            [x0, y1, z1],
            [x1, y1, z1],
        ]
    }

    /// The axis-aligned box enclosing this box after a transform. Not the
    /// transformed box itself: rotation widens the result.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = self.corners().map(|c| {
            let p = matrix.transform_point(Point3::new(c[0], c[1], c[2]));
            [p.x, p.y, p.z]
        });
        // Eight corners, so from_points never sees an empty set.
        Self::from_points(corners).unwrap_or(*self)
    }
}
