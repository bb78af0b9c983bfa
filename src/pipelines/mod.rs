//! Render pipeline definitions.
//!
//! - `basic` builds the main lit pipeline and the debug outline pipeline
//! - `light` owns the ambient + directional light uniform and bind group
//! - `shadow` owns the shadow map, its uniform, and the depth-only pipeline

pub mod basic;
pub mod light;
pub mod shadow;

/// The three pipelines one frame runs, built once at startup.
#[derive(Debug)]
pub struct Pipelines {
    pub scene: wgpu::RenderPipeline,
    pub outline: wgpu::RenderPipeline,
    pub shadow: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
        shadow: &shadow::ShadowResources,
    ) -> Self {
        Self {
            scene: basic::mk_scene_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
                &shadow.sample_bind_group_layout,
            ),
            outline: basic::mk_outline_pipeline(device, config, camera_bind_group_layout),
            shadow: shadow::mk_shadow_pipeline(device, &shadow.pass_bind_group_layout),
        }
    }
}
