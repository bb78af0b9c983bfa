//! stillroom
//!
//! A small cross-platform renderer for a static, hand-authored interior
//! scene. The crate is built around a declarative scene description: a
//! table of glTF model placements, two textured planes, an ambient and a
//! directional light, and a fixed camera pose, all literal constants
//! written once. Assets load asynchronously and fire-and-forget; the
//! render loop starts immediately and draws whatever has arrived.
//!
//! High-level modules
//! - `scene`: placement and descriptor types plus the degree/radian boundary
//! - `camera`: fixed-pose camera, projection and uniforms
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: engine data models (meshes, instances, textures, scene graph)
//! - `resources`: helpers to load textures/models and create GPU resources
//! - `pipelines`: render pipeline definitions (scene, shadow, outline)
//! - `render`: per-frame draw-list composition
//! - `app`: winit event loop, async asset spawning and frame rendering
//! - `reading_room`: the authored scene table this repository exists to show
//!

pub mod app;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod reading_room;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::*;
pub use winit::event::WindowEvent;
