//! Fixed-pose camera, projection and uniforms.
//!
//! The camera never moves after setup: its pose comes straight from the
//! scene descriptor's literals, rotation authored in degrees. Only the
//! projection reacts to anything at runtime (the window aspect ratio).

use cgmath::{Deg, Euler, Matrix4, Point3, Rad, SquareMatrix, Vector3, perspective};

use crate::scene::{CameraPose, deg_to_rad};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// World-space viewpoint: position plus an Euler rotation in radians.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    pub rotation: Euler<Rad<f32>>,
}

impl Camera {
    pub fn new(position: impl Into<Point3<f32>>, rotation: Euler<Rad<f32>>) -> Self {
        Self {
            position: position.into(),
            rotation,
        }
    }

    pub fn from_pose(pose: &CameraPose) -> Self {
        Self::new(
            pose.position,
            Euler {
                x: Rad(deg_to_rad(pose.rotation_deg[0])),
                y: Rad(deg_to_rad(pose.rotation_deg[1])),
                z: Rad(deg_to_rad(pose.rotation_deg[2])),
            },
        )
    }

    /// The view matrix: inverse of the camera's world transform.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let world = Matrix4::from_translation(Vector3::new(
            self.position.x,
            self.position.y,
            self.position.z,
        )) * Matrix4::from(self.rotation);
        world.invert().unwrap_or_else(Matrix4::identity)
    }
}

/// Perspective projection; owns the aspect ratio so resizes stay local.
#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy: Deg<f32>, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// The camera data as the shaders see it.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_pos: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_pos: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_pos = [camera.position.x, camera.position.y, camera.position.z, 1.0];
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera state bundled with its GPU resources.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    /// Rewrite the uniform buffer after a pose or projection change.
    pub fn write(&mut self, queue: &wgpu::Queue, projection: &Projection) {
        self.uniform.update_view_proj(&self.camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
