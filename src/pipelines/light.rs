use cgmath::InnerSpace;
use wgpu::util::DeviceExt;

use crate::scene::{AmbientLight, DirectionalLight};

/// Ambient and directional light bundled with their GPU resources.
#[derive(Debug)]
pub struct LightingResources {
    pub uniform: LightsUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightingResources {
    pub fn new(device: &wgpu::Device, ambient: &AmbientLight, sun: &DirectionalLight) -> Self {
        let uniform = LightsUniform::new(ambient, sun);
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    ambient_color: [f32; 3],
    ambient_intensity: f32,
    sun_color: [f32; 3],
    sun_intensity: f32,
    // Direction the parallel rays travel, not the position of the sun.
    sun_direction: [f32; 3],
    // Uniforms require 16-byte (4 float) alignment, hence the padding field.
    _padding: f32,
}

impl LightsUniform {
    pub fn new(ambient: &AmbientLight, sun: &DirectionalLight) -> Self {
        let direction = -cgmath::Vector3::from(sun.position).normalize();
        Self {
            ambient_color: ambient.color,
            ambient_intensity: ambient.intensity,
            sun_color: sun.color,
            sun_intensity: sun.intensity,
            sun_direction: direction.into(),
            _padding: 0.0,
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, uniform: LightsUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Buffer"),
        contents: bytemuck::cast_slice(&[uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: None,
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: None,
    })
}
