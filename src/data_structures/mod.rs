//! Engine data structures: models, textures, transforms and the scene graph.
//!
//! - `model` contains mesh and material definitions, GPU resources for 3D models
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `instance` holds the per-node transform and its GPU packing
//! - `bounds` is the axis-aligned bounding box feeding the debug outlines
//! - `scene_graph` enables hierarchical scene organization

pub mod bounds;
pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
