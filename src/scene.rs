//! Declarative scene description.
//!
//! Everything the renderer shows is written down here as data: where each
//! model goes, how the two planes lie, what the lights look like and where
//! the camera stands. Rotations are authored in degrees (the way humans
//! place furniture) and converted to the engine's radian/quaternion
//! conventions at this boundary.

use cgmath::{Euler, Quaternion, Rad};

use crate::data_structures::instance::Instance;

/// Convert an angle in degrees to radians (`d * PI / 180`).
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Per-object shadow participation: whether the object is drawn into the
/// shadow map and whether the shadow map darkens it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShadowFlags {
    pub cast: bool,
    pub receive: bool,
}

impl ShadowFlags {
    pub const NONE: Self = Self {
        cast: false,
        receive: false,
    };
    pub const CAST_AND_RECEIVE: Self = Self {
        cast: true,
        receive: true,
    };
}

/// A hand-authored local transform: position, rotation in degrees, scale.
/// Every component is a full per-axis vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: [f32; 3],
    pub rotation_deg: [f32; 3],
    pub scale: [f32; 3],
}

impl Placement {
    pub const fn new(position: [f32; 3], rotation_deg: [f32; 3], scale: [f32; 3]) -> Self {
        Self {
            position,
            rotation_deg,
            scale,
        }
    }

    /// Uniform scale on all three axes, the common case for imported models.
    pub const fn scaled(position: [f32; 3], rotation_deg: [f32; 3], scale: f32) -> Self {
        Self::new(position, rotation_deg, [scale, scale, scale])
    }

    /// Convert to the engine transform: degrees become a rotation quaternion.
    pub fn to_instance(&self) -> Instance {
        let rotation = Quaternion::from(Euler {
            x: Rad(deg_to_rad(self.rotation_deg[0])),
            y: Rad(deg_to_rad(self.rotation_deg[1])),
            z: Rad(deg_to_rad(self.rotation_deg[2])),
        });
        Instance {
            position: self.position.into(),
            rotation,
            scale: self.scale.into(),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new([0.0; 3], [0.0; 3], [1.0; 3])
    }
}

/// One imported model: asset path plus where it goes and how it shadows.
#[derive(Clone, Debug)]
pub struct ModelPlacement {
    pub asset: &'static str,
    pub placement: Placement,
    pub shadows: ShadowFlags,
}

/// A textured rectangle (floor or wall): size in world units, texture
/// asset, placement. The plane lies in the XY plane facing +Z before its
/// placement rotation is applied.
#[derive(Clone, Debug)]
pub struct PlaneSurface {
    pub size: [f32; 2],
    pub texture: &'static str,
    pub placement: Placement,
    pub shadows: ShadowFlags,
}

/// A pre-composed multi-object scene file inserted with its embedded
/// transforms trusted as-is.
#[derive(Clone, Debug)]
pub struct CompositeScene {
    pub asset: &'static str,
}

/// Uniform base illumination.
#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Parallel-ray key light. `position` fixes the shadow-map viewpoint; the
/// rays point from it toward the origin.
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: [f32; 3],
    pub cast_shadow: bool,
}

/// The fixed viewpoint, applied once at startup.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    pub position: [f32; 3],
    pub rotation_deg: [f32; 3],
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
}

/// The whole scene as one ordered table. The renderer consumes this once
/// at startup; nothing in it changes afterwards.
#[derive(Clone, Debug)]
pub struct SceneDescriptor {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub planes: Vec<PlaneSurface>,
    pub models: Vec<ModelPlacement>,
    pub composites: Vec<CompositeScene>,
    pub camera: CameraPose,
}

impl SceneDescriptor {
    /// Scene-object population once every load has succeeded: one node per
    /// plane and composite, two per model (the model and its debug outline).
    pub fn expected_object_count(&self) -> usize {
        self.planes.len() + self.models.len() * 2 + self.composites.len()
    }
}
